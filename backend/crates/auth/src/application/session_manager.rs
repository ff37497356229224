//! Session Manager
//!
//! Sole authority translating a session token into a user id. Issues
//! tokens, resolves them, destroys them and sweeps expired records out of
//! whatever `SessionRepository` backs it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use kernel::id::UserId;
use tokio::task::JoinHandle;

use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult};

/// A freshly issued session, ready to be handed to the client
#[derive(Debug)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}

/// Session manager over a swappable store
pub struct SessionManager<S>
where
    S: SessionRepository,
{
    store: Arc<S>,
    ttl: Duration,
}

impl<S> SessionManager<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a new session for `user_id`
    pub async fn create(&self, user_id: UserId) -> AuthResult<IssuedSession> {
        let ttl = TimeDelta::from_std(self.ttl)
            .map_err(|e| AuthError::Internal(format!("Session TTL out of range: {e}")))?;

        let token = SessionToken::generate();
        let session = Session::issue(token.key(), user_id, Utc::now(), ttl)
            .ok_or_else(|| AuthError::Internal("Session expiry out of range".into()))?;
        let expires_at = session.expires_at;

        self.store.insert(session).await?;

        tracing::debug!(user_id = %user_id, %expires_at, "Session issued");
        Ok(IssuedSession { token, expires_at })
    }

    /// Resolve a presented token to a user id
    ///
    /// Unknown, expired and unreadable sessions all yield `None`. An expired
    /// record found here is purged on the spot.
    pub async fn resolve(&self, token: &str) -> Option<UserId> {
        let key = SessionToken::from_presented(token).key();

        let session = match self.store.find(&key).await {
            Ok(session) => session?,
            Err(e) => {
                tracing::error!(error = %e, "Session lookup failed");
                return None;
            }
        };

        if session.is_expired_at(Utc::now()) {
            if let Err(e) = self.store.delete(&key).await {
                tracing::warn!(error = %e, "Failed to purge expired session");
            }
            return None;
        }

        Some(session.user_id)
    }

    /// Destroy a session. Idempotent.
    pub async fn destroy(&self, token: &str) -> AuthResult<()> {
        let key = SessionToken::from_presented(token).key();
        self.store.delete(&key).await
    }

    /// Purge every expired session, returning how many were removed
    pub async fn sweep(&self) -> AuthResult<u64> {
        self.store.cleanup_expired(Utc::now()).await
    }

    /// Run [`SessionManager::sweep`] every `period` on a background task
    ///
    /// The first sweep happens one full period after spawning.
    pub fn spawn_sweeper(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                match manager.sweep().await {
                    Ok(purged) => tracing::info!(purged, "Expired sessions swept"),
                    Err(e) => tracing::error!(error = %e, "Session sweep failed"),
                }
            }
        })
    }
}
