//! Application wiring
//!
//! Builds the stores once and nests every feature router under `/api`.

use std::sync::Arc;

use advisor::presentation::handlers::AdvisorAppState;
use advisor::{AnthropicClient, advisor_router};
use auth::presentation::handlers::AuthAppState;
use auth::{MemorySessionRepository, MemoryUserRepository, SessionManager, auth_router};
use axum::Router;
use ledger::presentation::handlers::LedgerAppState;
use ledger::{MemoryLedgerRepository, ledger_router};

use crate::config::ServerConfig;

/// Long-lived services shared by every router
pub struct Services {
    pub users: Arc<MemoryUserRepository>,
    pub sessions: Arc<SessionManager<MemorySessionRepository>>,
    pub ledger: Arc<MemoryLedgerRepository<MemoryUserRepository>>,
    pub completion: Arc<AnthropicClient>,
}

impl Services {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let users = Arc::new(MemoryUserRepository::new());
        let sessions = Arc::new(SessionManager::new(
            Arc::new(MemorySessionRepository::new()),
            config.auth.session_ttl,
        ));
        let ledger = Arc::new(MemoryLedgerRepository::new(users.clone()));
        let completion = Arc::new(AnthropicClient::new(&config.advisor)?);

        Ok(Self {
            users,
            sessions,
            ledger,
            completion,
        })
    }
}

/// Build the `/api` router
pub fn build_router(config: &ServerConfig, services: &Services) -> Router {
    let auth_state = AuthAppState {
        users: services.users.clone(),
        sessions: services.sessions.clone(),
        config: Arc::new(config.auth.clone()),
    };
    let gate = auth_state.middleware_state();

    let ledger_state = LedgerAppState {
        ledger: services.ledger.clone(),
        config: Arc::new(config.ledger.clone()),
    };

    let advisor_state = AdvisorAppState {
        users: services.users.clone(),
        completion: services.completion.clone(),
        config: Arc::new(config.advisor.clone()),
    };

    let api = Router::new()
        .merge(auth_router(auth_state))
        .merge(ledger_router(ledger_state, gate.clone()))
        .merge(advisor_router(advisor_state, gate));

    Router::new().nest("/api", api)
}
