//! Application Layer

pub mod ask_advisor;
pub mod config;

// Re-exports
pub use ask_advisor::AskAdvisorUseCase;
pub use config::AdvisorConfig;
