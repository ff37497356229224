//! In-Memory Repository Implementations
//!
//! Volatile, process-local stores. Each store object is owned by the
//! service and shared by handle; tests build a fresh one per case.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{IdSequence, UserId, markers};
use kernel::money::Cents;
use tokio::sync::RwLock;

use crate::domain::entity::{
    session::Session,
    user::{NewUser, User},
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{handle::Handle, session_token::SessionKey};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// User Repository Implementation
// ============================================================================

#[derive(Default)]
struct UserTable {
    by_id: HashMap<UserId, User>,
    by_handle: HashMap<String, UserId>,
    by_national_id: HashMap<String, UserId>,
}

/// In-memory credential store
#[derive(Default)]
pub struct MemoryUserRepository {
    table: RwLock<UserTable>,
    ids: IdSequence<markers::User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users
    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> AuthResult<User> {
        let mut table = self.table.write().await;

        if table.by_handle.contains_key(new_user.handle.as_str()) {
            return Err(AuthError::HandleTaken);
        }
        if table
            .by_national_id
            .contains_key(new_user.national_id.as_str())
        {
            return Err(AuthError::NationalIdTaken);
        }

        let user = User::from_new(self.ids.next_id(), new_user);
        table
            .by_handle
            .insert(user.handle.as_str().to_string(), user.user_id);
        table
            .by_national_id
            .insert(user.national_id.as_str().to_string(), user.user_id);
        table.by_id.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.table.read().await.by_id.get(&user_id).cloned())
    }

    async fn find_by_handle(&self, handle: &Handle) -> AuthResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table
            .by_handle
            .get(handle.as_str())
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn update_balance(&self, user_id: UserId, balance: Cents) -> AuthResult<User> {
        let mut table = self.table.write().await;
        let user = table
            .by_id
            .get_mut(&user_id)
            .ok_or(AuthError::UserNotFound)?;
        user.balance = balance;
        Ok(user.clone())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

/// In-memory session store keyed by token digest
#[derive(Default)]
pub struct MemorySessionRepository {
    sessions: RwLock<HashMap<SessionKey, Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn insert(&self, session: Session) -> AuthResult<()> {
        self.sessions.write().await.insert(session.key, session);
        Ok(())
    }

    async fn find(&self, key: &SessionKey) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &SessionKey) -> AuthResult<()> {
        self.sessions.write().await.remove(key);
        Ok(())
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}
