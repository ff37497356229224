//! Auth Middleware
//!
//! Gate for protected routes. Resolves the session cookie once per request
//! and attaches the identity to the request extensions, or short-circuits
//! with 401 before the handler runs.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;

use crate::application::session_manager::SessionManager;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Middleware state
pub struct AuthMiddlewareState<S>
where
    S: SessionRepository,
{
    pub sessions: Arc<SessionManager<S>>,
    pub cookie_name: Arc<str>,
}

impl<S> Clone for AuthMiddlewareState<S>
where
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            cookie_name: Arc::clone(&self.cookie_name),
        }
    }
}

/// Identity resolved from the session, read-only for handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid session
pub async fn require_auth_session<S>(
    State(state): State<AuthMiddlewareState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionRepository + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.cookie_name)
        .ok_or(AuthError::Unauthenticated)?;

    let user_id = state
        .sessions
        .resolve(&token)
        .await
        .ok_or(AuthError::Unauthenticated)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

impl<St> FromRequestParts<St> for AuthenticatedUser
where
    St: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or(AuthError::Unauthenticated)
    }
}
