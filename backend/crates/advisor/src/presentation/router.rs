//! Advisor Router

use auth::domain::repository::{SessionRepository, UserRepository};
use auth::middleware::{AuthMiddlewareState, require_auth_session};
use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::domain::completion::CompletionService;
use crate::presentation::handlers::{self, AdvisorAppState};

/// Create the advisor router. `POST /chat` requires a session.
pub fn advisor_router<U, C, S>(
    state: AdvisorAppState<U, C>,
    auth: AuthMiddlewareState<S>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    C: CompletionService + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/chat", post(handlers::chat::<U, C>))
        .route_layer(from_fn_with_state(auth, require_auth_session::<S>))
        .with_state(state)
}
