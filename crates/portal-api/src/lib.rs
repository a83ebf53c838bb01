//! Onboarding portal: HTTP API.
//!
//! Library half of the server binary: configuration, telemetry, identity
//! extraction and the axum routers. [`build_router`] assembles the full
//! application and is shared by `main` and the integration tests.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // TODO: Replace CorsLayer::permissive() with the portal's origin once it is configurable.
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/session", routes::session::router())
        .nest("/api/v1/record", routes::record::router())
        .nest("/api/v1/portal", routes::portal::router())
        .nest("/api/v1/admin", routes::admin::router())
        .nest("/api/v1/registration", routes::registration::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
