//! HTTP Handlers

use std::sync::Arc;

use auth::middleware::AuthenticatedUser;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::config::LedgerConfig;
use crate::application::{ListTransactionsUseCase, RecordTransactionUseCase};
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::error::LedgerResult;
use crate::presentation::dto::CreateTransactionRequest;

/// Shared state for ledger handlers
pub struct LedgerAppState<L>
where
    L: LedgerRepository,
{
    pub ledger: Arc<L>,
    pub config: Arc<LedgerConfig>,
}

impl<L> Clone for LedgerAppState<L>
where
    L: LedgerRepository,
{
    fn clone(&self) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            config: Arc::clone(&self.config),
        }
    }
}

/// GET /api/transactions
pub async fn list_transactions<L>(
    State(state): State<LedgerAppState<L>>,
    auth: AuthenticatedUser,
) -> LedgerResult<Json<Vec<Transaction>>>
where
    L: LedgerRepository + Send + Sync + 'static,
{
    let use_case = ListTransactionsUseCase::new(state.ledger.clone(), state.config.clone());
    Ok(Json(use_case.execute(auth.user_id).await?))
}

/// POST /api/transactions
pub async fn create_transaction<L>(
    State(state): State<LedgerAppState<L>>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> LedgerResult<impl IntoResponse>
where
    L: LedgerRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = RecordTransactionUseCase::new(state.ledger.clone(), state.config.clone());

    let (transaction, _user) = use_case.execute(auth.user_id, req.into()).await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
