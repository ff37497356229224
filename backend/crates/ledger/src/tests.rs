//! Ledger consistency and router tests

use std::sync::Arc;
use std::time::Duration;

use auth::application::session_manager::SessionManager;
use auth::domain::entity::user::NewUser;
use auth::domain::repository::UserRepository;
use auth::infra::memory::{MemorySessionRepository, MemoryUserRepository};
use auth::middleware::AuthMiddlewareState;
use auth::models::{DisplayName, Handle, NationalId, PhoneNumber, UserPassword};
use kernel::id::UserId;
use kernel::money::Cents;

use crate::application::config::LedgerConfig;
use crate::application::{
    ListTransactionsUseCase, RecordTransactionInput, RecordTransactionUseCase,
};
use crate::domain::entities::Transaction;
use crate::domain::repository::LedgerRepository;
use crate::domain::value_objects::Direction;
use crate::error::LedgerError;
use crate::infra::memory::MemoryLedgerRepository;

const WAIT: Duration = Duration::from_secs(5);

struct Fixture {
    users: Arc<MemoryUserRepository>,
    ledger: Arc<MemoryLedgerRepository<MemoryUserRepository>>,
    record: RecordTransactionUseCase<MemoryLedgerRepository<MemoryUserRepository>>,
    list: ListTransactionsUseCase<MemoryLedgerRepository<MemoryUserRepository>>,
}

impl Fixture {
    fn new() -> Self {
        let users = Arc::new(MemoryUserRepository::new());
        let ledger = Arc::new(MemoryLedgerRepository::new(Arc::clone(&users)));
        let config = Arc::new(LedgerConfig {
            lock_wait: WAIT,
            ..LedgerConfig::default()
        });
        Self {
            record: RecordTransactionUseCase::new(Arc::clone(&ledger), Arc::clone(&config)),
            list: ListTransactionsUseCase::new(Arc::clone(&ledger), config),
            users,
            ledger,
        }
    }

    async fn user(&self, handle: &str, national_id: &str, balance: u64) -> UserId {
        self.users
            .create(NewUser {
                handle: Handle::new(handle).unwrap(),
                // Never verified in these tests
                password: UserPassword::from_stored("a2id1$unused.unused"),
                display_name: DisplayName::new("Test User").unwrap(),
                national_id: NationalId::new(national_id).unwrap(),
                phone_number: PhoneNumber::new("0123456789").unwrap(),
                balance: Cents::new(balance),
            })
            .await
            .unwrap()
            .user_id
    }

    async fn balance(&self, user_id: UserId) -> Cents {
        self.users
            .find_by_id(user_id)
            .await
            .unwrap()
            .unwrap()
            .balance
    }
}

fn input(direction: Direction, amount: i64, description: &str) -> RecordTransactionInput {
    RecordTransactionInput {
        amount: Some(amount),
        direction: Some(direction),
        description: Some(description.to_string()),
    }
}

fn assert_newest_first(transactions: &[Transaction]) {
    for pair in transactions.windows(2) {
        assert!(
            pair[0].timestamp > pair[1].timestamp
                || (pair[0].timestamp == pair[1].timestamp && pair[0].id > pair[1].id),
            "transactions out of order: {:?} before {:?}",
            pair[0].id,
            pair[1].id
        );
    }
}

// ============================================================================
// Ledger engine
// ============================================================================

#[tokio::test]
async fn test_debit_then_overdraw() {
    let fx = Fixture::new();
    let user = fx.user("alice", "111111111111", 10_000).await;

    let (rent, updated) = fx
        .record
        .execute(user, input(Direction::Debit, 3_000, "rent"))
        .await
        .unwrap();
    assert_eq!(rent.amount.cents(), Cents::new(3_000));
    assert_eq!(rent.direction, Direction::Debit);
    assert_eq!(updated.balance, Cents::new(7_000));

    let overdraw = fx
        .record
        .execute(user, input(Direction::Debit, 8_000, "overdraw"))
        .await;
    assert!(matches!(overdraw, Err(LedgerError::InsufficientFunds)));

    assert_eq!(fx.balance(user).await, Cents::new(7_000));
    assert_eq!(fx.list.execute(user).await.unwrap(), vec![rent.clone()]);

    // The rejected debit did not consume an id
    let (next, _) = fx
        .record
        .execute(user, input(Direction::Credit, 1, "top-up"))
        .await
        .unwrap();
    assert_eq!(next.id.get(), rent.id.get() + 1);
}

#[tokio::test]
async fn test_balance_equals_sum_of_committed_deltas() {
    let fx = Fixture::new();
    let user = fx.user("alice", "111111111111", 10_000).await;

    let ops = [
        (Direction::Credit, 500),
        (Direction::Debit, 12_000),
        (Direction::Debit, 4_000),
        (Direction::Credit, 250),
        (Direction::Debit, 6_751),
        (Direction::Debit, 6_750),
        (Direction::Debit, 1),
    ];

    let mut expected: i64 = 10_000;
    let mut committed = 0;
    for (direction, amount) in ops {
        if fx
            .record
            .execute(user, input(direction, amount, "op"))
            .await
            .is_ok()
        {
            committed += 1;
            expected += match direction {
                Direction::Credit => amount,
                Direction::Debit => -amount,
            };
        }
    }

    assert_eq!(expected, 0);
    assert_eq!(fx.balance(user).await, Cents::ZERO);
    assert_eq!(fx.list.execute(user).await.unwrap().len(), committed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_debits_commit_exactly_what_the_balance_allows() {
    const N: usize = 25;
    const K: usize = 10;

    let fx = Arc::new(Fixture::new());
    let user = fx.user("alice", "111111111111", 1_000 * K as u64).await;

    let tasks: Vec<_> = (0..N)
        .map(|i| {
            let fx = Arc::clone(&fx);
            tokio::spawn(async move {
                fx.record
                    .execute(user, input(Direction::Debit, 1_000, &format!("debit {i}")))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    let mut insufficient = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok((_, user)) => {
                ok += 1;
                assert!(user.balance.get() <= 1_000 * K as u64);
            }
            Err(LedgerError::InsufficientFunds) => insufficient += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(ok, K);
    assert_eq!(insufficient, N - K);
    assert_eq!(fx.balance(user).await, Cents::ZERO);

    let transactions = fx.list.execute(user).await.unwrap();
    assert_eq!(transactions.len(), K);
    assert_newest_first(&transactions);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_listing_stays_ordered_under_concurrent_writes() {
    let fx = Arc::new(Fixture::new());
    let alice = fx.user("alice", "111111111111", 0).await;
    let bob = fx.user("bob", "222222222222", 0).await;

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let fx = Arc::clone(&fx);
            let user = if i % 2 == 0 { alice } else { bob };
            tokio::spawn(async move {
                fx.record
                    .execute(user, input(Direction::Credit, 10, "deposit"))
                    .await
                    .unwrap();
                fx.list.execute(user).await.unwrap()
            })
        })
        .collect();

    for task in tasks {
        assert_newest_first(&task.await.unwrap());
    }

    let alice_log = fx.list.execute(alice).await.unwrap();
    assert_eq!(alice_log.len(), 20);
    assert!(alice_log.iter().all(|t| t.user_id == alice));
    assert_eq!(fx.balance(alice).await, Cents::new(200));
    assert_eq!(fx.balance(bob).await, Cents::new(200));
}

#[tokio::test]
async fn test_lock_wait_is_bounded() {
    let fx = Fixture::new();
    let alice = fx.user("alice", "111111111111", 10_000).await;
    let bob = fx.user("bob", "222222222222", 10_000).await;

    let held = fx.ledger.lock(alice, WAIT).await.unwrap();

    let blocked = fx
        .ledger
        .record(
            alice,
            crate::domain::entities::NewTransaction {
                direction: Direction::Debit,
                amount: crate::domain::value_objects::Amount::new(100).unwrap(),
                description: crate::domain::value_objects::Description::new("coffee", 200)
                    .unwrap(),
            },
            Duration::from_millis(20),
        )
        .await;
    assert!(matches!(blocked, Err(LedgerError::Busy)));

    // Other accounts are unaffected
    fx.record
        .execute(bob, input(Direction::Debit, 100, "coffee"))
        .await
        .unwrap();

    drop(held);
    assert_eq!(fx.balance(alice).await, Cents::new(10_000));
    fx.record
        .execute(alice, input(Direction::Debit, 100, "coffee"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_malformed_input_is_rejected_before_the_ledger() {
    let fx = Fixture::new();
    let user = fx.user("alice", "111111111111", 10_000).await;

    let cases = [
        input(Direction::Debit, 0, "zero"),
        input(Direction::Debit, -100, "negative"),
        input(Direction::Credit, 100, "   "),
        RecordTransactionInput {
            amount: Some(100),
            direction: None,
            description: Some("no type".into()),
        },
        RecordTransactionInput {
            amount: Some(100),
            direction: Some(Direction::Credit),
            description: None,
        },
    ];

    for case in cases {
        assert!(matches!(
            fx.record.execute(user, case).await,
            Err(LedgerError::MalformedInput(_))
        ));
    }
    assert!(fx.list.execute(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_account() {
    let fx = Fixture::new();
    let result = fx
        .record
        .execute(UserId::from_raw(404), input(Direction::Credit, 1, "ghost"))
        .await;
    assert!(matches!(result, Err(LedgerError::AccountNotFound)));
    assert!(fx.list.execute(UserId::from_raw(404)).await.unwrap().is_empty());
    assert!(matches!(
        fx.ledger.lock(UserId::from_raw(404), WAIT).await,
        Err(LedgerError::AccountNotFound)
    ));
    assert_eq!(fx.ledger.tracked_accounts().await, 0);

    let user = fx.user("alice", "111111111111", 10_000).await;
    fx.record
        .execute(user, input(Direction::Credit, 1, "first"))
        .await
        .unwrap();
    assert_eq!(fx.ledger.tracked_accounts().await, 1);
}

// ============================================================================
// Router
// ============================================================================

mod router_tests {
    use super::*;
    use crate::presentation::handlers::LedgerAppState;
    use crate::presentation::router::ledger_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct App {
        router: Router,
        cookie: String,
    }

    async fn app() -> App {
        let fx = Fixture::new();
        let user = fx.user("alice", "111111111111", 10_000).await;

        let sessions = Arc::new(SessionManager::new(
            Arc::new(MemorySessionRepository::new()),
            Duration::from_secs(3600),
        ));
        let issued = sessions.create(user).await.unwrap();

        let router = ledger_router(
            LedgerAppState {
                ledger: fx.ledger,
                config: Arc::new(LedgerConfig::default()),
            },
            AuthMiddlewareState {
                sessions,
                cookie_name: Arc::from("bank_session"),
            },
        );

        App {
            router,
            cookie: format!("bank_session={}", issued.token.as_str()),
        }
    }

    fn post(cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::post("/transactions")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_requires_session() {
        let app = app().await;

        let response = app
            .router
            .clone()
            .oneshot(Request::get("/transactions").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .router
            .clone()
            .oneshot(post(
                Some("bank_session=forged"),
                json!({"amount": 100, "type": "credit", "description": "x"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Nothing was written by the rejected request
        let response = app
            .router
            .oneshot(
                Request::get("/transactions")
                    .header(header::COOKIE, &app.cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let app = app().await;

        let response = app
            .router
            .clone()
            .oneshot(post(
                Some(&app.cookie),
                json!({"amount": 3000, "type": "debit", "description": "rent"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["amount"], 3000);
        assert_eq!(created["type"], "debit");
        assert_eq!(created["description"], "rent");
        assert!(created["userId"].is_u64());
        assert!(created["timestamp"].is_string());

        let response = app
            .router
            .clone()
            .oneshot(post(
                Some(&app.cookie),
                json!({"amount": 8000, "type": "debit", "description": "overdraw"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Insufficient funds");

        let response = app
            .router
            .oneshot(
                Request::get("/transactions")
                    .header(header::COOKIE, &app.cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([created]));
    }

    #[tokio::test]
    async fn test_malformed_bodies() {
        let app = app().await;

        for body in [
            json!({"amount": 0, "type": "credit", "description": "zero"}),
            json!({"amount": 100, "type": "refund", "description": "bad type"}),
            json!({"amount": 100, "type": "credit"}),
            json!({"amount": "100", "type": "credit", "description": "string amount"}),
            json!({"amount": 1.5, "type": "credit", "description": "fraction"}),
        ] {
            let response = app
                .router
                .clone()
                .oneshot(post(Some(&app.cookie), body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        }
    }
}
