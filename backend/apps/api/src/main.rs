//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::application::CleanupExpiredSessionsUseCase;
use auth::{
    AuthAppState, InMemorySessionStore, PgAuthRepository, admin_router, auth_router,
    spawn_session_sweeper,
};
use axum::Router;
use axum::http::{Method, header};
use habit::{BadgeProvisioner, HabitAppState, HabitConfig, PgHabitRepository, habit_router};
use kernel::clock::{Clock, SystemClock};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,habit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Habit feature
    let habit_repo = Arc::new(PgHabitRepository::new(pool.clone()));
    let habit_state = HabitAppState::new(habit_repo.clone(), HabitConfig::default(), clock.clone());

    // Auth feature; registration seeds the badge set through the habit store
    if config.auth.admin.is_none() {
        tracing::info!("No administrator configured; admin login disabled");
    }
    let sessions = Arc::new(InMemorySessionStore::new());
    let auth_state = AuthAppState {
        repo: Arc::new(PgAuthRepository::new(pool.clone())),
        sessions: sessions.clone(),
        provisioner: Arc::new(BadgeProvisioner::new(
            habit_repo,
            habit_state.config.clone(),
        )),
        config: Arc::new(config.auth),
        clock: clock.clone(),
    };

    let shutdown = CancellationToken::new();
    let sweeper = config.sweep_interval.map(|period| {
        tracing::info!(period_secs = period.as_secs(), "Starting session sweeper");
        spawn_session_sweeper(
            CleanupExpiredSessionsUseCase::new(sessions, clock.clone()),
            period,
            shutdown.clone(),
        )
    });

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_router(auth_state.clone()))
        .nest("/api/admin", admin_router(auth_state.clone()))
        .nest("/api", habit_router(habit_state, auth_state.session_guard()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
    .await?;

    shutdown.cancel();
    if let Some(handle) = sweeper
        && let Err(e) = handle.await
    {
        tracing::warn!(error = %e, "Session sweeper task failed");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.cancelled() => {}
    }
}
