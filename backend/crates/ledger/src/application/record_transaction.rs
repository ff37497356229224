//! Record Transaction Use Case

use std::sync::Arc;

use auth::models::User;
use kernel::id::UserId;

use crate::application::config::LedgerConfig;
use crate::domain::entities::{NewTransaction, Transaction};
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::{Amount, Description, Direction};
use crate::error::{LedgerError, LedgerResult};

/// Unvalidated input, as received at the boundary
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    pub amount: Option<i64>,
    pub direction: Option<Direction>,
    pub description: Option<String>,
}

/// Record Transaction Use Case
pub struct RecordTransactionUseCase<L>
where
    L: LedgerRepository,
{
    ledger: Arc<L>,
    config: Arc<LedgerConfig>,
}

impl<L> RecordTransactionUseCase<L>
where
    L: LedgerRepository,
{
    pub fn new(ledger: Arc<L>, config: Arc<LedgerConfig>) -> Self {
        Self { ledger, config }
    }

    /// Returns the committed transaction and the user as updated by it
    pub async fn execute(
        &self,
        user_id: UserId,
        input: RecordTransactionInput,
    ) -> LedgerResult<(Transaction, User)> {
        let new = self.validate(input)?;

        let result = self
            .ledger
            .record(user_id, new.clone(), self.config.lock_wait)
            .await;

        match &result {
            Ok((transaction, user)) => tracing::info!(
                user_id = %user_id,
                transaction_id = %transaction.id,
                direction = %transaction.direction,
                amount = transaction.amount.cents().get(),
                balance = user.balance.get(),
                "Transaction recorded"
            ),
            Err(LedgerError::InsufficientFunds) => tracing::info!(
                user_id = %user_id,
                amount = new.amount.cents().get(),
                "Debit rejected: insufficient funds"
            ),
            Err(_) => {}
        }

        result
    }

    fn validate(&self, input: RecordTransactionInput) -> LedgerResult<NewTransaction> {
        let amount = input
            .amount
            .ok_or_else(|| LedgerError::MalformedInput("Amount is required".into()))?;
        let direction = input.direction.ok_or_else(|| {
            LedgerError::MalformedInput("Type must be \"credit\" or \"debit\"".into())
        })?;
        let description = input
            .description
            .ok_or_else(|| LedgerError::MalformedInput("Description is required".into()))?;

        Ok(NewTransaction {
            direction,
            amount: Amount::new(amount)?,
            description: Description::new(&description, self.config.max_description_len)?,
        })
    }
}
