//! Routes for sign-in completion.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use portal_admin::application::query_handlers::ensure_registration_allowed;
use portal_core::employee_id::EmployeeId;
use portal_progression::application::command_handlers;
use portal_progression::application::context::RecordContext;
use portal_progression::application::query_handlers::RecordView;
use portal_progression::domain::commands;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::session::Session;
use crate::state::AppState;

/// Request body for POST /start.
#[derive(Debug, Default, Deserialize)]
pub struct StartSessionRequest {
    /// Employee id typed on the sign-up form; only read when the user has
    /// no record yet.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Response body for POST /start.
#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    /// `true` if this sign-in created the record.
    pub registered: bool,
    /// The record after the write.
    #[serde(flatten)]
    pub view: RecordView,
}

/// POST /start
#[instrument(skip(state, session, request))]
async fn start(
    session: Session,
    State(state): State<AppState>,
    JsonBody(request): JsonBody<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, ApiError> {
    let identity = session.require()?;
    let correlation_id = Uuid::new_v4();
    let clock = state.clock.as_ref();
    let records = state.records.as_ref();

    let existing = RecordContext::new(&identity.user_id, clock, records)
        .load()
        .await?;
    if existing.is_some() {
        let command = commands::RecordLogin {
            correlation_id,
            user_id: identity.user_id,
        };
        info!(correlation_id = %command.correlation_id, "handling record_login command");
        let result = command_handlers::handle_record_login(&command, clock, records).await?;
        return Ok(Json(StartSessionResponse {
            registered: false,
            view: result.record.into(),
        }));
    }

    let employee_id = EmployeeId::normalize(request.employee_id.as_deref().unwrap_or_default())?;
    ensure_registration_allowed(&employee_id, state.allow_list.as_ref()).await?;
    let command = commands::RegisterEmployee {
        correlation_id,
        user_id: identity.user_id,
        email: identity.email,
        employee_id,
    };
    info!(correlation_id = %command.correlation_id, "handling register_employee command");
    let result = command_handlers::handle_register_employee(&command, clock, records).await?;

    Ok(Json(StartSessionResponse {
        registered: true,
        view: result.record.into(),
    }))
}

/// Returns the router for sign-in completion.
pub fn router() -> Router<AppState> {
    Router::new().route("/start", post(start))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use portal_core::store::{AllowListEntry, AllowListStore};
    use portal_progression::domain::seed::starter_record;
    use portal_test_support::{FailingRecordStore, InMemoryAllowListStore, InMemoryRecordStore};
    use serde_json::json;

    use super::*;
    use crate::routes::testing::{request, send, state_with, state_with_records};

    async fn allow_list_with(raw: &str, active: bool) -> Arc<InMemoryAllowListStore> {
        let allow_list = Arc::new(InMemoryAllowListStore::new());
        allow_list
            .upsert(
                &EmployeeId::normalize(raw).unwrap(),
                AllowListEntry {
                    active,
                    created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                },
            )
            .await
            .unwrap();
        allow_list
    }

    #[tokio::test]
    async fn test_start_registers_allow_listed_employee() {
        // Arrange
        let records = Arc::new(InMemoryRecordStore::new());
        let app = router().with_state(state_with(
            records.clone(),
            allow_list_with("AB12", true).await,
        ));

        // Act
        let (status, json) = send(
            app,
            request(
                "POST",
                "/start",
                Some(("user-1", "new.starter@example.com")),
                Some(&json!({ "employee_id": " ab 12 " })),
            ),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["registered"], true);
        assert_eq!(json["record"]["employeeId"], "AB12");
        assert_eq!(json["record"]["createdAt"], "2026-01-15T10:00:00Z");
        assert_eq!(json["stage_index"], 0);
        assert!(records.document("user-1").is_some());
    }

    #[tokio::test]
    async fn test_start_rejects_employee_not_on_allow_list() {
        let records = Arc::new(InMemoryRecordStore::new());
        let app = router().with_state(state_with(
            records.clone(),
            allow_list_with("AB12", false).await,
        ));

        let (status, json) = send(
            app,
            request(
                "POST",
                "/start",
                Some(("user-1", "new.starter@example.com")),
                Some(&json!({ "employee_id": "AB12" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "forbidden");
        assert!(records.patches().is_empty());
    }

    #[tokio::test]
    async fn test_start_rejects_employee_id_registered_to_another_user() {
        // Arrange
        let record = starter_record("AB12", "new.starter@example.com");
        let records = Arc::new(InMemoryRecordStore::with_document(
            "user-1",
            serde_json::to_value(record).unwrap(),
        ));
        let app = router().with_state(state_with(
            records.clone(),
            allow_list_with("AB12", true).await,
        ));

        // Act
        let (status, json) = send(
            app,
            request(
                "POST",
                "/start",
                Some(("user-2", "someone.else@example.com")),
                Some(&json!({ "employee_id": "AB12" })),
            ),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"], "forbidden");
        assert!(records.document("user-2").is_none());
    }

    #[tokio::test]
    async fn test_start_without_employee_id_is_validation_error() {
        let app = router().with_state(state_with_records(Arc::new(InMemoryRecordStore::new())));

        let (status, json) = send(
            app,
            request("POST", "/start", Some(("user-1", "")), Some(&json!({}))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_start_stamps_login_for_existing_record() {
        let record = starter_record("AB12", "new.starter@example.com");
        let records = Arc::new(InMemoryRecordStore::with_document(
            "user-1",
            serde_json::to_value(record).unwrap(),
        ));
        let app = router().with_state(state_with_records(records.clone()));

        let (status, json) = send(
            app,
            request("POST", "/start", Some(("user-1", "")), Some(&json!({}))),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["registered"], false);
        assert_eq!(json["record"]["lastLoginAt"], "2026-01-15T10:00:00Z");
        assert_eq!(
            records.patches()[0].1,
            json!({
                "lastLoginAt": "2026-01-15T10:00:00.000Z",
                "updatedAt": "2026-01-15T10:00:00.000Z"
            })
        );
    }

    #[tokio::test]
    async fn test_start_requires_identity() {
        let app = router().with_state(state_with_records(Arc::new(InMemoryRecordStore::new())));

        let (status, json) = send(app, request("POST", "/start", None, Some(&json!({})))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_start_store_failure_returns_500() {
        let app = router().with_state(state_with_records(Arc::new(FailingRecordStore)));

        let (status, json) = send(
            app,
            request("POST", "/start", Some(("user-1", "")), Some(&json!({}))),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "infrastructure_error");
    }
}
