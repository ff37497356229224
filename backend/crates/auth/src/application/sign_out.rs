//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::session_manager::SessionManager;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    sessions: Arc<SessionManager<S>>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(sessions: Arc<SessionManager<S>>) -> Self {
        Self { sessions }
    }

    /// Sign out from the current session
    ///
    /// Signing out without a session, or with one that is already gone,
    /// succeeds.
    pub async fn execute(&self, session_token: Option<&str>) -> AuthResult<()> {
        if let Some(token) = session_token {
            self.sessions.destroy(token).await?;
            tracing::info!("User signed out");
        }
        Ok(())
    }
}
