//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth_session;

/// Create the Auth router for any store implementation
///
/// Routes:
/// - `POST /users` register
/// - `GET /users/me` current user (session required)
/// - `POST /sessions` sign in
/// - `DELETE /sessions` sign out
pub fn auth_router<U, S>(state: AuthAppState<U, S>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/users/me", get(handlers::current_user::<U, S>))
        .route_layer(from_fn_with_state(
            state.middleware_state(),
            require_auth_session::<S>,
        ));

    Router::new()
        .route("/users", post(handlers::sign_up::<U, S>))
        .route(
            "/sessions",
            post(handlers::sign_in::<U, S>).delete(handlers::sign_out::<U, S>),
        )
        .merge(protected)
        .with_state(state)
}
