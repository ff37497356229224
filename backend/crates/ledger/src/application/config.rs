//! Application Configuration
//!
//! Configuration for the ledger application layer.

use std::time::Duration;

/// Ledger application configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Longest a request waits for an account's ledger lock before `Busy`
    pub lock_wait: Duration,
    /// Maximum transaction description length (in characters)
    pub max_description_len: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_wait: Duration::from_millis(2000),
            max_description_len: 200,
        }
    }
}
