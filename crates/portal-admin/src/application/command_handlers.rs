//! Command handlers for the Administration context.
//!
//! Appointment edits reuse the record save-then-reload cycle keyed by the
//! record id found through the employee-id lookup. Allow-list writes go
//! straight to the allow-list store.

use portal_core::clock::Clock;
use portal_core::command::Command;
use portal_core::error::DomainError;
use portal_core::store::{AllowListEntry, AllowListStore, RecordStore};
use portal_progression::application::context::RecordContext;
use portal_progression::domain::patch::RecordPatch;
use tracing::info;

use crate::application::query_handlers::{EmployeeView, find_employee};
use crate::domain::commands::{AllowEmployee, RevokeEmployee, UpdateAppointment};

fn log_command(command: &dyn Command) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        employee_id = %command.subject(),
        "handling command"
    );
}

/// Handles the `UpdateAppointment` command: looks the employee up, writes
/// only the appointment fields named in the command and returns the record
/// as re-read from the store.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the command names no field (checked
/// before any store call), `DomainError::RecordNotFound` if no record carries
/// the employee id, or any store error.
pub async fn handle_update_appointment(
    command: &UpdateAppointment,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<EmployeeView, DomainError> {
    if command.appointment.is_empty() {
        return Err(DomainError::Validation(
            "at least one appointment field is required".into(),
        ));
    }
    log_command(command);
    let found = find_employee(&command.employee_id, store).await?;
    let ctx = RecordContext::new(&found.record_id, clock, store);

    let record = ctx
        .patch_and_reload(RecordPatch {
            appointment: Some(command.appointment.clone()),
            ..RecordPatch::default()
        })
        .await?;

    Ok(EmployeeView {
        record_id: found.record_id,
        record,
    })
}

/// Handles the `AllowEmployee` command: creates the entry or merges into the
/// existing one, and returns the entry as stored. Allowing the same id twice
/// leaves a single entry with its original creation time.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_allow_employee(
    command: &AllowEmployee,
    clock: &dyn Clock,
    allow_list: &dyn AllowListStore,
) -> Result<AllowListEntry, DomainError> {
    log_command(command);
    let entry = AllowListEntry {
        active: true,
        created_at: clock.now(),
    };
    allow_list.upsert(&command.employee_id, entry).await?;
    Ok(allow_list.get(&command.employee_id).await?.unwrap_or(entry))
}

/// Handles the `RevokeEmployee` command. Revoking an id that is not on the
/// allow-list succeeds.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn handle_revoke_employee(
    command: &RevokeEmployee,
    allow_list: &dyn AllowListStore,
) -> Result<(), DomainError> {
    log_command(command);
    allow_list.remove(&command.employee_id).await
}
