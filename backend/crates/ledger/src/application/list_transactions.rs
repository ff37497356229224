//! List Transactions Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::LedgerConfig;
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::error::LedgerResult;

pub struct ListTransactionsUseCase<L>
where
    L: LedgerRepository,
{
    ledger: Arc<L>,
    config: Arc<LedgerConfig>,
}

impl<L> ListTransactionsUseCase<L>
where
    L: LedgerRepository,
{
    pub fn new(ledger: Arc<L>, config: Arc<LedgerConfig>) -> Self {
        Self { ledger, config }
    }

    /// Newest first. A user with no transactions gets an empty list.
    pub async fn execute(&self, user_id: UserId) -> LedgerResult<Vec<Transaction>> {
        self.ledger
            .list_for_user(user_id, self.config.lock_wait)
            .await
    }
}
