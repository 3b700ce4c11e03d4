use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use loserpool_backend::run;
use loserpool_backend::config::settings::get_config;
use loserpool_backend::db::{MatchupQueries, SettingsQueries};
use loserpool_backend::providers::build_provider;
use loserpool_backend::services::SchedulerService;
use loserpool_backend::state::AppState;
use loserpool_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match get_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to read the config: {}", e);
            std::process::exit(1);
        }
    };

    let subscriber = get_subscriber(
        "loserpool-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used
    let connection_pool = match PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(config.database.connection_string().expose_secret())
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create Postgres connection pool: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    let provider = match build_provider(&config.schedule_source, &config.pool.default_preseason_start) {
        Ok(provider) => {
            tracing::info!("Schedule provider '{}' configured", provider.name());
            provider
        }
        Err(e) => {
            tracing::error!("Invalid schedule source configuration: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        Arc::new(MatchupQueries::new(connection_pool.clone())),
        Arc::new(SettingsQueries::new(connection_pool.clone())),
        provider,
        &config.pool.default_preseason_start,
    );

    // Keep the scheduler alive for the lifetime of the server
    let scheduler = if config.pool.scheduler_enabled {
        let scheduler = match SchedulerService::new(state.week_service.clone(), state.sync_service.clone()).await {
            Ok(scheduler) => scheduler,
            Err(e) => {
                tracing::error!("❌ Failed to create scheduler service: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = scheduler.schedule_pool_jobs(&config.pool).await {
            tracing::error!("❌ Failed to schedule pool jobs: {}", e);
            std::process::exit(1);
        }
        if let Err(e) = scheduler.start().await {
            tracing::error!("❌ Failed to start scheduler: {}", e);
            std::process::exit(1);
        }
        Some(scheduler)
    } else {
        tracing::info!("Scheduler disabled, updates run only through admin triggers");
        None
    };

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    let result = run(
        listener,
        state,
        config.application.admin_token,
        config.application.allowed_origins,
    )?.await;

    if let Some(scheduler) = scheduler {
        if let Err(e) = scheduler.stop().await {
            tracing::error!("Failed to stop scheduler: {}", e);
        }
    }

    result
}
