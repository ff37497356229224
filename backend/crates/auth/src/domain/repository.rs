//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::money::Cents;

use crate::domain::entity::{
    session::Session,
    user::{NewUser, User},
};
use crate::domain::value_object::{handle::Handle, session_token::SessionKey};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Register a new user and assign its id
    ///
    /// Fails with `HandleTaken` / `NationalIdTaken` on a uniqueness
    /// violation; no id is consumed in that case.
    async fn create(&self, new_user: NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by exact handle
    async fn find_by_handle(&self, handle: &Handle) -> AuthResult<Option<User>>;

    /// Overwrite a user's balance
    ///
    /// Reserved for the ledger, which calls it while holding the user's
    /// ledger lock. Returns the updated user.
    async fn update_balance(&self, user_id: UserId, balance: Cents) -> AuthResult<User>;
}

/// Session store
///
/// Implementations may be in-process or externally backed; the session
/// manager depends only on this contract.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a new session
    async fn insert(&self, session: Session) -> AuthResult<()>;

    /// Find a session by token digest, expired or not
    async fn find(&self, key: &SessionKey) -> AuthResult<Option<Session>>;

    /// Remove a session. Removing an unknown key is not an error.
    async fn delete(&self, key: &SessionKey) -> AuthResult<()>;

    /// Remove every session expired as of `now`, returning how many were removed
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
