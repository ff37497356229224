//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::{Arc, LazyLock};

use crate::application::session_manager::{IssuedSession, SessionManager};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    handle::Handle,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Hash verified against when the handle is unknown, so both failure paths
/// cost one KDF evaluation.
static DUMMY_HASH: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    UserPassword::from_raw(&RawPassword::for_sign_in(
        "dummy-password-for-timing".to_string(),
    ))
    .ok()
});

/// Build the timing-equalisation hash ahead of the first sign-in
///
/// Call once at startup, off the async executor. Returns whether the hash
/// is available.
pub fn prepare_sign_in() -> bool {
    LazyLock::force(&DUMMY_HASH).is_some()
}

/// Sign in input
pub struct SignInInput {
    pub handle: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub session: IssuedSession,
    pub user: User,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    sessions: Arc<SessionManager<S>>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, sessions: Arc<SessionManager<S>>) -> Self {
        Self {
            user_repo,
            sessions,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user = match Handle::for_sign_in(&input.handle) {
            Some(handle) => self.user_repo.find_by_handle(&handle).await?,
            None => None,
        };

        let raw_password = RawPassword::for_sign_in(input.password);
        let stored = user.as_ref().map(|u| u.password.clone());

        let password_valid = tokio::task::spawn_blocking(move || match stored {
            Some(hash) => hash.verify(&raw_password),
            None => {
                if let Some(dummy) = DUMMY_HASH.as_ref() {
                    let _ = dummy.verify(&raw_password);
                }
                false
            }
        })
        .await?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let session = self.sessions.create(user.user_id).await?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput { session, user })
    }
}
