//! Routes for the Administration context. Every route requires an
//! administrator.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::put};
use tracing::{info, instrument};
use uuid::Uuid;

use portal_admin::application::command_handlers;
use portal_admin::application::query_handlers::{
    self, AllowListEntryView, EmployeeView, find_employee,
};
use portal_admin::domain::commands;
use portal_core::employee_id::EmployeeId;
use portal_progression::domain::patch::AppointmentPatch;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::session::RequireAdmin;
use crate::state::AppState;

/// GET `/employees/{employee_id}`
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
async fn get_employee(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<EmployeeView>, ApiError> {
    let employee_id = EmployeeId::normalize(&employee_id)?;
    let view = find_employee(&employee_id, state.records.as_ref()).await?;
    Ok(Json(view))
}

/// PUT `/employees/{employee_id}/appointment`
#[instrument(skip(state, admin, appointment), fields(admin = %admin.0.email))]
async fn update_appointment(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    JsonBody(appointment): JsonBody<AppointmentPatch>,
) -> Result<Json<EmployeeView>, ApiError> {
    let command = commands::UpdateAppointment {
        correlation_id: Uuid::new_v4(),
        employee_id: EmployeeId::normalize(&employee_id)?,
        appointment,
    };

    info!(correlation_id = %command.correlation_id, "handling update_appointment command");

    let view = command_handlers::handle_update_appointment(
        &command,
        state.clock.as_ref(),
        state.records.as_ref(),
    )
    .await?;

    Ok(Json(view))
}

/// GET /allow-list
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
async fn list_allow_list(
    admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AllowListEntryView>>, ApiError> {
    let entries = query_handlers::list_allow_list(state.allow_list.as_ref()).await?;
    Ok(Json(entries))
}

/// PUT `/allow-list/{employee_id}`
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
async fn allow_employee(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<Json<AllowListEntryView>, ApiError> {
    let command = commands::AllowEmployee {
        correlation_id: Uuid::new_v4(),
        employee_id: EmployeeId::normalize(&employee_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling allow_employee command");

    let entry = command_handlers::handle_allow_employee(
        &command,
        state.clock.as_ref(),
        state.allow_list.as_ref(),
    )
    .await?;

    Ok(Json(AllowListEntryView {
        employee_id: command.employee_id,
        active: entry.active,
        created_at: entry.created_at,
    }))
}

/// DELETE `/allow-list/{employee_id}`
#[instrument(skip(state, admin), fields(admin = %admin.0.email))]
async fn revoke_employee(
    admin: RequireAdmin,
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let command = commands::RevokeEmployee {
        correlation_id: Uuid::new_v4(),
        employee_id: EmployeeId::normalize(&employee_id)?,
    };

    info!(correlation_id = %command.correlation_id, "handling revoke_employee command");

    command_handlers::handle_revoke_employee(&command, state.allow_list.as_ref()).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for the administration context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees/{employee_id}", get(get_employee))
        .route(
            "/employees/{employee_id}/appointment",
            put(update_appointment),
        )
        .route("/allow-list", get(list_allow_list))
        .route(
            "/allow-list/{employee_id}",
            put(allow_employee).delete(revoke_employee),
        )
}
