//! Routes for reading the current user's record.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tracing::{debug, instrument};

use portal_progression::application::query_handlers::RecordView;

use crate::routes::current_record;
use crate::session::Session;
use crate::state::AppState;

/// GET /
#[instrument(skip(state, session))]
async fn get_current_record(session: Session, State(state): State<AppState>) -> Json<RecordView> {
    let view = RecordView::from(current_record(&session, &state).await);
    debug!(demo = view.demo, stage_index = view.stage_index, "record loaded");
    Json(view)
}

/// Returns the router for record reads.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_current_record))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use portal_test_support::{FailingRecordStore, InMemoryRecordStore};
    use serde_json::json;

    use super::*;
    use crate::routes::testing::{request, send, state_with_records};

    #[tokio::test]
    async fn test_preview_session_sees_demo_record() {
        let records = Arc::new(InMemoryRecordStore::with_document(
            "user-1",
            json!({ "employeeId": "AB12" }),
        ));
        let app = router().with_state(state_with_records(records));

        let (status, json) = send(app, request("GET", "/", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["demo"], true);
        assert_eq!(json["record"]["employeeId"], "DEMO001");
    }

    #[tokio::test]
    async fn test_signed_in_user_sees_own_record() {
        let records = Arc::new(InMemoryRecordStore::with_document(
            "user-1",
            json!({ "employeeId": "AB12", "stage": "onboarding" }),
        ));
        let app = router().with_state(state_with_records(records));

        let (status, json) = send(app, request("GET", "/", Some(("user-1", "")), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["demo"], false);
        assert_eq!(json["stage_index"], 2);
        assert_eq!(json["stages"][2]["status"], "active");
    }

    #[tokio::test]
    async fn test_load_failure_falls_back_to_demo() {
        let app = router().with_state(state_with_records(Arc::new(FailingRecordStore)));

        let (status, json) = send(app, request("GET", "/", Some(("user-1", "")), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["demo"], true);
    }
}
