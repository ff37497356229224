//! Advisor (Loan Chat) Backend Module
//!
//! Thin boundary around an external text-completion service. The chat
//! endpoint reads the customer's profile but never mutates ledger state.
//!
//! - `domain/` - Completion port, prompt
//! - `application/` - Use case, configuration
//! - `infra/` - HTTP client for the completion service
//! - `presentation/` - HTTP handler, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AdvisorConfig;
pub use error::{AdvisorError, AdvisorResult};
pub use infra::anthropic::AnthropicClient;
pub use presentation::router::advisor_router;

#[cfg(test)]
mod tests;
