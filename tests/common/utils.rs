use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::net::TcpListener;
use std::sync::Arc;

use loserpool_backend::db::InMemoryStore;
use loserpool_backend::models::week::SeasonWeek;
use loserpool_backend::providers::{GameRecord, MockProvider};
use loserpool_backend::run;
use loserpool_backend::services::{MatchupSyncService, WeekService};
use loserpool_backend::state::AppState;
use loserpool_backend::telemetry::{get_subscriber, init_subscriber};

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";
pub const TEST_PRESEASON_START: &str = "2025-08-07";

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub provider: Arc<MockProvider>,
    pub admin_token: String,
}

impl TestApp {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.admin_token)
    }
}

/// Services wired to an in-memory store and a scripted mock source, no HTTP
pub struct TestServices {
    pub store: Arc<InMemoryStore>,
    pub provider: Arc<MockProvider>,
    pub week_service: WeekService,
    pub sync_service: MatchupSyncService,
}

pub fn init_tracing() {
    Lazy::force(&TRACING);
}

pub fn build_services() -> TestServices {
    init_tracing();
    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(MockProvider::scripted());
    let state = AppState::new(store.clone(), store.clone(), provider.clone(), TEST_PRESEASON_START);

    TestServices {
        store,
        provider,
        week_service: state.week_service,
        sync_service: state.sync_service,
    }
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryStore::new());
    let provider = Arc::new(MockProvider::scripted());
    let state = AppState::new(store.clone(), store.clone(), provider.clone(), TEST_PRESEASON_START);

    let server = run(
        listener,
        state,
        SecretString::new(TEST_ADMIN_TOKEN.to_string().into_boxed_str()),
        vec!["http://localhost:3000".to_string()],
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        provider,
        admin_token: TEST_ADMIN_TOKEN.to_string(),
    }
}

pub fn week(tag: &str) -> SeasonWeek {
    SeasonWeek::parse(tag).expect("valid season week tag")
}

pub fn game(away: &str, home: &str, kickoff: &str) -> GameRecord {
    GameRecord {
        away_team: away.to_string(),
        home_team: home.to_string(),
        kickoff: Some(kickoff.to_string()),
        status: Some("Scheduled".to_string()),
        ..Default::default()
    }
}
