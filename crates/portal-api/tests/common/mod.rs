//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use portal_api::build_router;
use portal_api::config::AdminEmails;
use portal_api::session::{EMAIL_HEADER, USER_HEADER};
use portal_api::state::AppState;
use portal_core::clock::Clock;
use portal_core::store::{AllowListStore, RecordStore};
use portal_document_store::pg_allow_list_store::PgAllowListStore;
use portal_document_store::pg_record_store::PgRecordStore;
use portal_test_support::{FixedClock, InMemoryAllowListStore, InMemoryRecordStore, fixed_now};
use sqlx::PgPool;
use tower::ServiceExt;

/// Administrator email configured in every test app.
pub const ADMIN_EMAIL: &str = "ops@example.com";

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(fixed_now()))
}

/// Build the full app router over the given stores with a fixed clock.
pub fn build_app_with(
    records: Arc<dyn RecordStore>,
    allow_list: Arc<dyn AllowListStore>,
) -> Router {
    build_router(AppState::new(
        fixed_clock(),
        records,
        allow_list,
        AdminEmails::parse(ADMIN_EMAIL),
    ))
}

/// Build the full app router over fresh in-memory stores, returned so tests
/// can reuse them across requests.
pub fn in_memory_stores() -> (Arc<InMemoryRecordStore>, Arc<InMemoryAllowListStore>) {
    (
        Arc::new(InMemoryRecordStore::new()),
        Arc::new(InMemoryAllowListStore::new()),
    )
}

/// Build the full app router over the `PostgreSQL` stores.
pub fn build_pg_app(pool: PgPool) -> Router {
    build_app_with(
        Arc::new(PgRecordStore::new(pool.clone())),
        Arc::new(PgAllowListStore::new(pool)),
    )
}

/// Who sends a request.
#[derive(Debug, Clone, Copy)]
pub enum As<'a> {
    /// No identity headers.
    Anonymous,
    /// A signed-in user.
    User(&'a str, &'a str),
    /// The configured administrator.
    Admin,
}

/// Send a request with an optional JSON body and return the status and the
/// JSON response (`null` for an empty body).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    who: As<'_>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    match who {
        As::Anonymous => {}
        As::User(user_id, email) => {
            builder = builder
                .header(USER_HEADER, user_id)
                .header(EMAIL_HEADER, email);
        }
        As::Admin => {
            builder = builder
                .header(USER_HEADER, "admin-1")
                .header(EMAIL_HEADER, ADMIN_EMAIL);
        }
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}
