//! In-Memory Ledger
//!
//! Each user's transaction log sits behind its own async mutex. That mutex
//! is the unit of mutual exclusion for the (balance, log) pair: the balance
//! is read, checked, written and the entry appended while it is held.
//! Different users never contend except on the outer map, which is only
//! write-locked the first time a user touches the ledger.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use auth::domain::repository::UserRepository;
use auth::models::User;
use chrono::Utc;
use kernel::id::{IdSequence, UserId, markers};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::entities::{NewTransaction, Transaction};
use crate::domain::repository::LedgerRepository;
use crate::error::{LedgerError, LedgerResult};

type Account = Arc<Mutex<Vec<Transaction>>>;

/// In-memory ledger over a credential store
pub struct MemoryLedgerRepository<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    accounts: RwLock<HashMap<UserId, Account>>,
    ids: IdSequence<markers::Transaction>,
}

impl<U> MemoryLedgerRepository<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            accounts: RwLock::new(HashMap::new()),
            ids: IdSequence::new(),
        }
    }

    async fn existing_account(&self, user_id: UserId) -> Option<Account> {
        self.accounts.read().await.get(&user_id).map(Arc::clone)
    }

    /// The user's account, created on first touch for known users only
    async fn account(&self, user_id: UserId) -> LedgerResult<Account> {
        if let Some(account) = self.existing_account(user_id).await {
            return Ok(account);
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound);
        }
        let mut accounts = self.accounts.write().await;
        Ok(Arc::clone(accounts.entry(user_id).or_default()))
    }

    /// Acquire the user's ledger lock, giving up after `lock_wait`
    pub(crate) async fn lock(
        &self,
        user_id: UserId,
        lock_wait: Duration,
    ) -> LedgerResult<OwnedMutexGuard<Vec<Transaction>>> {
        let account = self.account(user_id).await?;
        Self::acquire(account, lock_wait).await
    }

    async fn acquire(
        account: Account,
        lock_wait: Duration,
    ) -> LedgerResult<OwnedMutexGuard<Vec<Transaction>>> {
        tokio::time::timeout(lock_wait, account.lock_owned())
            .await
            .map_err(|_| LedgerError::Busy)
    }

    #[cfg(test)]
    pub(crate) async fn tracked_accounts(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl<U> LedgerRepository for MemoryLedgerRepository<U>
where
    U: UserRepository + Send + Sync,
{
    async fn record(
        &self,
        user_id: UserId,
        new: NewTransaction,
        lock_wait: Duration,
    ) -> LedgerResult<(Transaction, User)> {
        let mut log = self.lock(user_id, lock_wait).await?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(LedgerError::AccountNotFound)?;

        // Fails before anything is written or any id is drawn
        let balance = new.direction.apply(user.balance, new.amount)?;

        let user = self.users.update_balance(user_id, balance).await?;

        let transaction = Transaction {
            id: self.ids.next_id(),
            user_id,
            amount: new.amount,
            direction: new.direction,
            description: new.description,
            timestamp: Utc::now(),
        };
        log.push(transaction.clone());

        Ok((transaction, user))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        lock_wait: Duration,
    ) -> LedgerResult<Vec<Transaction>> {
        // No account entry means nothing was ever recorded
        let Some(account) = self.existing_account(user_id).await else {
            return Ok(Vec::new());
        };
        let log = Self::acquire(account, lock_wait).await?;
        let mut transactions = log.clone();
        drop(log);

        transactions.sort_by(Transaction::newest_first);
        Ok(transactions)
    }
}
