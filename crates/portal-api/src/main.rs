//! Onboarding portal API server entry point.

use std::sync::Arc;

use portal_api::config::Config;
use portal_api::error::AppError;
use portal_api::state::AppState;
use portal_api::{build_router, telemetry};
use portal_core::clock::SystemClock;
use portal_document_store::pg_allow_list_store::PgAllowListStore;
use portal_document_store::pg_record_store::PgRecordStore;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting onboarding portal API server");

    // Create database connection pool and bring the schema up to date.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;

    if config.admin_emails.is_empty() {
        warn!("ADMIN_EMAILS is empty, administrator routes will reject every caller");
    }

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(PgRecordStore::new(pool.clone())),
        Arc::new(PgAllowListStore::new(pool)),
        config.admin_emails.clone(),
    );

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, build_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry.shutdown();
    Ok(())
}
