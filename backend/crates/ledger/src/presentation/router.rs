//! Ledger Router

use auth::domain::repository::SessionRepository;
use auth::middleware::{AuthMiddlewareState, require_auth_session};
use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::domain::repository::LedgerRepository;
use crate::presentation::handlers::{self, LedgerAppState};

/// Create the ledger router
///
/// Every route requires a session; the gate runs before any handler.
pub fn ledger_router<L, S>(state: LedgerAppState<L>, auth: AuthMiddlewareState<S>) -> Router
where
    L: LedgerRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions::<L>).post(handlers::create_transaction::<L>),
        )
        .route_layer(from_fn_with_state(auth, require_auth_session::<S>))
        .with_state(state)
}
