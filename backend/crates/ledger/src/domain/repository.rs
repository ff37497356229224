//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::time::Duration;

use auth::models::User;
use kernel::id::UserId;

use crate::domain::entities::{NewTransaction, Transaction};
use crate::error::LedgerResult;

/// Ledger repository trait
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    /// Commit a transaction and the balance change it implies
    ///
    /// Both become visible together or not at all. Calls for the same user
    /// are serialized; waiting longer than `lock_wait` for that user's turn
    /// fails with `Busy`. On `InsufficientFunds` nothing is written and no
    /// transaction id is consumed. Returns the transaction and the updated
    /// user.
    async fn record(
        &self,
        user_id: UserId,
        new: NewTransaction,
        lock_wait: Duration,
    ) -> LedgerResult<(Transaction, User)>;

    /// All transactions of a user, newest first
    async fn list_for_user(&self, user_id: UserId, lock_wait: Duration)
    -> LedgerResult<Vec<Transaction>>;
}
