//! Registration check used by the sign-up form before an account exists.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use portal_admin::application::query_handlers::{RegistrationStatus, check_registration};
use portal_core::employee_id::EmployeeId;

use crate::error::ApiError;
use crate::state::AppState;

/// GET `/{employee_id}`
#[instrument(skip(state))]
async fn check(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<RegistrationStatus>, ApiError> {
    let employee_id = EmployeeId::normalize(&employee_id)?;
    let status = check_registration(&employee_id, state.allow_list.as_ref()).await?;
    Ok(Json(status))
}

/// Returns the router for registration checks.
pub fn router() -> Router<AppState> {
    Router::new().route("/{employee_id}", get(check))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use portal_core::store::{AllowListEntry, AllowListStore};
    use portal_test_support::{
        FailingAllowListStore, InMemoryAllowListStore, InMemoryRecordStore, fixed_now,
    };

    use super::*;
    use crate::routes::testing::{request, send, state_with};

    #[tokio::test]
    async fn test_check_reports_allow_listed_id() {
        let allow_list = Arc::new(InMemoryAllowListStore::new());
        allow_list
            .upsert(
                &EmployeeId::normalize("AB12").unwrap(),
                AllowListEntry {
                    active: true,
                    created_at: fixed_now(),
                },
            )
            .await
            .unwrap();
        let state = state_with(Arc::new(InMemoryRecordStore::new()), allow_list);

        let (status, json) = send(
            router().with_state(state.clone()),
            request("GET", "/ab12", None, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["employee_id"], "AB12");
        assert_eq!(json["allowed"], true);

        let (_, json) = send(router().with_state(state), request("GET", "/EF56", None, None)).await;
        assert_eq!(json["allowed"], false);
    }

    #[tokio::test]
    async fn test_check_store_failure_returns_500() {
        let state = state_with(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(FailingAllowListStore),
        );

        let (status, _) = send(router().with_state(state), request("GET", "/AB12", None, None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
