//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie::{extract_cookie, set_cookie_header};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, SessionManager, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{SignInRequest, SignUpRequest, UserResponse};
use crate::presentation::middleware::{AuthMiddlewareState, AuthenticatedUser};

/// Shared state for auth handlers
pub struct AuthAppState<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: Arc<U>,
    pub sessions: Arc<SessionManager<S>>,
    pub config: Arc<AuthConfig>,
}

impl<U, S> Clone for AuthAppState<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            config: Arc::clone(&self.config),
        }
    }
}

impl<U, S> AuthAppState<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// State for [`require_auth_session`](crate::presentation::middleware::require_auth_session)
    /// sharing this state's session manager
    pub fn middleware_state(&self) -> AuthMiddlewareState<S> {
        AuthMiddlewareState {
            sessions: Arc::clone(&self.sessions),
            cookie_name: Arc::from(self.config.session_cookie_name.as_str()),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/users
pub async fn sign_up<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.users.clone(), state.config.clone());

    let user = use_case
        .execute(SignUpInput {
            handle: req.username,
            password: req.password,
            display_name: req.full_name,
            national_id: req.national_id,
            phone_number: req.mobile_number,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/sessions
pub async fn sign_in<U, S>(
    State(state): State<AuthAppState<U, S>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = SignInUseCase::new(state.users.clone(), state.sessions.clone());

    let output = use_case
        .execute(SignInInput {
            handle: req.username,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie()
        .build_set_cookie(output.session.token.as_str());

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(UserResponse::from(&output.user)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// DELETE /api/sessions
pub async fn sign_out<U, S>(
    State(state): State<AuthAppState<U, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let token = extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = SignOutUseCase::new(state.sessions.clone());
    // Sign-out always succeeds for the client; the cookie is cleared regardless
    if let Err(e) = use_case.execute(token.as_deref()).await {
        tracing::warn!(error = %e, "Failed to destroy session on sign-out");
    }

    let cookie = state.config.cookie().build_delete_cookie();

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
    )
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/users/me
pub async fn current_user<U, S>(
    State(state): State<AuthAppState<U, S>>,
    auth: AuthenticatedUser,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.users.clone());
    let user = use_case.execute(auth.user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}
