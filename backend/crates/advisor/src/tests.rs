//! Advisor use case and router tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use auth::application::session_manager::SessionManager;
use auth::domain::entity::user::NewUser;
use auth::domain::repository::UserRepository;
use auth::infra::memory::{MemorySessionRepository, MemoryUserRepository};
use auth::middleware::AuthMiddlewareState;
use auth::models::{DisplayName, Handle, NationalId, PhoneNumber, UserPassword};
use kernel::id::UserId;
use kernel::money::Cents;

use crate::application::ask_advisor::FALLBACK_REPLY;
use crate::application::{AdvisorConfig, AskAdvisorUseCase};
use crate::domain::completion::{CompletionRequest, CompletionService};
use crate::error::{AdvisorError, AdvisorResult};

/// Completion service that records what it was asked
struct StubCompletion {
    reply: fn() -> AdvisorResult<Option<String>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    fn new(reply: fn() -> AdvisorResult<Option<String>>) -> Self {
        Self {
            reply,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl CompletionService for StubCompletion {
    async fn complete(&self, request: &CompletionRequest) -> AdvisorResult<Option<String>> {
        self.seen.lock().unwrap().push(request.clone());
        (self.reply)()
    }
}

async fn user(users: &MemoryUserRepository, balance: u64) -> UserId {
    users
        .create(NewUser {
            handle: Handle::new("jane").unwrap(),
            password: UserPassword::from_stored("a2id1$unused.unused"),
            display_name: DisplayName::new("Jane Doe").unwrap(),
            national_id: NationalId::new("123456789012").unwrap(),
            phone_number: PhoneNumber::new("0123456789").unwrap(),
            balance: Cents::new(balance),
        })
        .await
        .unwrap()
        .user_id
}

fn use_case(
    users: Arc<MemoryUserRepository>,
    completion: Arc<StubCompletion>,
    share_balance: bool,
) -> AskAdvisorUseCase<MemoryUserRepository, StubCompletion> {
    AskAdvisorUseCase::new(
        users,
        completion,
        Arc::new(AdvisorConfig {
            share_balance,
            ..AdvisorConfig::default()
        }),
    )
}

#[tokio::test]
async fn test_reply_is_returned_verbatim_with_customer_context() {
    let users = Arc::new(MemoryUserRepository::new());
    let user_id = user(&users, 10_000).await;
    let completion = Arc::new(StubCompletion::new(|| Ok(Some("Rates start at 7%.".into()))));

    let reply = use_case(users, completion.clone(), true)
        .execute(user_id, Some("  What are your rates?  ".into()))
        .await
        .unwrap();
    assert_eq!(reply, "Rates start at 7%.");

    let requests = completion.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].message, "What are your rates?");
    assert_eq!(requests[0].max_tokens, 1000);
    assert!(requests[0].system.contains("Customer: Jane Doe"));
    assert!(requests[0].system.contains("Account Balance: $100.00"));
}

#[tokio::test]
async fn test_balance_is_withheld_when_sharing_is_disabled() {
    let users = Arc::new(MemoryUserRepository::new());
    let user_id = user(&users, 10_000).await;
    let completion = Arc::new(StubCompletion::new(|| Ok(Some("ok".into()))));

    use_case(users, completion.clone(), false)
        .execute(user_id, Some("hello".into()))
        .await
        .unwrap();

    let system = &completion.requests()[0].system;
    assert!(system.contains("Customer: Jane Doe"));
    assert!(!system.contains("$100.00"));
}

#[tokio::test]
async fn test_empty_completion_falls_back() {
    let users = Arc::new(MemoryUserRepository::new());
    let user_id = user(&users, 10_000).await;
    let completion = Arc::new(StubCompletion::new(|| Ok(None)));

    let reply = use_case(users, completion, true)
        .execute(user_id, Some("hello".into()))
        .await
        .unwrap();
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_invalid_messages_never_reach_the_service() {
    let users = Arc::new(MemoryUserRepository::new());
    let user_id = user(&users, 10_000).await;
    let completion = Arc::new(StubCompletion::new(|| Ok(Some("ok".into()))));
    let advisor = use_case(users, completion.clone(), true);

    for message in [None, Some(String::new()), Some("   ".into()), Some("x".repeat(4001))] {
        assert!(matches!(
            advisor.execute(user_id, message).await,
            Err(AdvisorError::MalformedInput(_))
        ));
    }
    assert!(advisor.execute(user_id, Some("x".repeat(4000))).await.is_ok());
    assert_eq!(completion.requests().len(), 1);
}

#[tokio::test]
async fn test_upstream_errors_propagate() {
    let users = Arc::new(MemoryUserRepository::new());
    let user_id = user(&users, 10_000).await;

    let completion = Arc::new(StubCompletion::new(|| Err(AdvisorError::AuthFailed)));
    assert!(matches!(
        use_case(users.clone(), completion, true)
            .execute(user_id, Some("hi".into()))
            .await,
        Err(AdvisorError::AuthFailed)
    ));

    let completion = Arc::new(StubCompletion::new(|| Err(AdvisorError::NotConfigured)));
    assert!(matches!(
        use_case(users, completion, true)
            .execute(user_id, Some("hi".into()))
            .await,
        Err(AdvisorError::NotConfigured)
    ));
}

#[tokio::test]
async fn test_unknown_user_is_unauthenticated() {
    let completion = Arc::new(StubCompletion::new(|| Ok(Some("ok".into()))));
    let result = use_case(Arc::new(MemoryUserRepository::new()), completion, true)
        .execute(UserId::from_raw(9), Some("hi".into()))
        .await;
    assert!(matches!(result, Err(AdvisorError::Unauthenticated)));
}

mod router_tests {
    use super::*;
    use crate::presentation::handlers::AdvisorAppState;
    use crate::presentation::router::advisor_router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn call(
        reply: fn() -> AdvisorResult<Option<String>>,
        authenticated: bool,
    ) -> (StatusCode, Value) {
        let users = Arc::new(MemoryUserRepository::new());
        let user_id = user(&users, 10_000).await;
        let sessions = Arc::new(SessionManager::new(
            Arc::new(MemorySessionRepository::new()),
            Duration::from_secs(3600),
        ));
        let issued = sessions.create(user_id).await.unwrap();

        let router = advisor_router(
            AdvisorAppState {
                users,
                completion: Arc::new(StubCompletion::new(reply)),
                config: Arc::new(AdvisorConfig::default()),
            },
            AuthMiddlewareState {
                sessions,
                cookie_name: Arc::from("bank_session"),
            },
        );

        let mut request = Request::post("/chat").header(header::CONTENT_TYPE, "application/json");
        if authenticated {
            request = request.header(
                header::COOKIE,
                format!("bank_session={}", issued.token.as_str()),
            );
        }
        let response = router
            .oneshot(
                request
                    .body(Body::from(json!({"message": "hi"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_chat_requires_session() {
        let (status, _) = call(|| Ok(Some("ok".into())), false).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_chat_reply() {
        let (status, body) = call(|| Ok(Some("Hello Jane".into())), true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello Jane"}));
    }

    #[tokio::test]
    async fn test_chat_error_mapping() {
        let (status, body) = call(|| Err(AdvisorError::NotConfigured), true).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["message"],
            "AI chat service is not properly configured. Please contact support."
        );

        let (status, body) = call(|| Err(AdvisorError::Upstream("boom".into())), true).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["message"],
            "I'm having trouble processing your request right now. Try again later."
        );
    }
}
