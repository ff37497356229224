//! Application Layer
//!
//! Use cases for the ledger.

pub mod config;
pub mod list_transactions;
pub mod record_transaction;

// Re-exports
pub use config::LedgerConfig;
pub use list_transactions::ListTransactionsUseCase;
pub use record_transaction::{RecordTransactionInput, RecordTransactionUseCase};
