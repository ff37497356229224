//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Transactions, amounts, repository traits
//! - `application/` - Use cases
//! - `infra/` - In-memory ledger
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Consistency Model
//! - A balance never goes below zero after any committed mutation
//! - A transaction and its balance change commit together or not at all
//! - Mutations on the same account are serialized by a per-account lock
//!   with a bounded wait; other accounts proceed independently
//! - Transaction ids are drawn from one lock-free sequence, only on commit

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use infra::memory::MemoryLedgerRepository;
pub use presentation::router::ledger_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
