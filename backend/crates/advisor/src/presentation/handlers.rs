//! HTTP Handlers

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::middleware::AuthenticatedUser;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::{AdvisorConfig, AskAdvisorUseCase};
use crate::domain::completion::CompletionService;
use crate::error::AdvisorResult;
use crate::presentation::dto::{ChatRequest, ChatResponse};

/// Shared state for advisor handlers
pub struct AdvisorAppState<U, C>
where
    U: UserRepository,
    C: CompletionService,
{
    pub users: Arc<U>,
    pub completion: Arc<C>,
    pub config: Arc<AdvisorConfig>,
}

impl<U, C> Clone for AdvisorAppState<U, C>
where
    U: UserRepository,
    C: CompletionService,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            completion: Arc::clone(&self.completion),
            config: Arc::clone(&self.config),
        }
    }
}

/// POST /api/chat
pub async fn chat<U, C>(
    State(state): State<AdvisorAppState<U, C>>,
    auth: AuthenticatedUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AdvisorResult<Json<ChatResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    C: CompletionService + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let use_case = AskAdvisorUseCase::new(
        state.users.clone(),
        state.completion.clone(),
        state.config.clone(),
    );

    let message = use_case.execute(auth.user_id, req.message).await?;
    Ok(Json(ChatResponse { message }))
}
