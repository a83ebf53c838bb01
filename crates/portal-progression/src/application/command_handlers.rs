//! Command handlers for the Record & Progression context.
//!
//! Each handler reads the current record, builds one patch and runs it
//! through the save-then-reload cycle. The stage is written explicitly by
//! each handler: some recompute it from the step list, some set it directly,
//! and selecting a shift leaves it alone.

use portal_core::clock::Clock;
use portal_core::command::Command;
use portal_core::error::DomainError;
use portal_core::store::RecordStore;
use tracing::info;

use crate::application::context::RecordContext;
use crate::domain::commands::{
    ConfirmShift, RecordLogin, RegisterEmployee, SelectShift, SubmitApplication, ToggleStep,
};
use crate::domain::patch::{RecordPatch, ShiftPatch};
use crate::domain::progression::next_stage;
use crate::domain::record::{OnboardingRecord, Stage, StepId};
use crate::domain::seed::starter_record;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct ProgressionCommandResult {
    /// The record key the command targeted.
    pub user_id: String,
    /// The record as re-read from the store after the write.
    pub record: OnboardingRecord,
    /// Whether a patch was written. `false` for commands that turned out to
    /// be no-ops.
    pub written: bool,
}

fn log_command(command: &dyn Command) {
    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        user_id = %command.subject(),
        "handling command"
    );
}

fn unchanged(user_id: &str, record: OnboardingRecord) -> ProgressionCommandResult {
    ProgressionCommandResult {
        user_id: user_id.to_owned(),
        record,
        written: false,
    }
}

async fn write(
    ctx: RecordContext<'_>,
    patch: RecordPatch,
) -> Result<ProgressionCommandResult, DomainError> {
    let record = ctx.patch_and_reload(patch).await?;
    Ok(ProgressionCommandResult {
        user_id: ctx.user_id().to_owned(),
        record,
        written: true,
    })
}

/// Handles the `RegisterEmployee` command: writes the starter record with
/// creation and sign-in timestamps.
///
/// The caller is responsible for checking the allow-list first.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` if another user's record already carries
/// the employee id, or `DomainError` if the write or the reload fails.
pub async fn handle_register_employee(
    command: &RegisterEmployee,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    log_command(command);
    let claimed = store.find_by_employee_id(&command.employee_id).await?;
    if claimed.is_some_and(|existing| existing.id != command.user_id) {
        return Err(DomainError::Forbidden(format!(
            "employee id {} is already registered",
            command.employee_id
        )));
    }
    let ctx = RecordContext::new(&command.user_id, clock, store);
    let starter = starter_record(command.employee_id.as_str(), &command.email);
    let now = clock.now();

    write(
        ctx,
        RecordPatch {
            employee_id: Some(starter.employee_id),
            email: Some(starter.email),
            stage: Some(starter.stage),
            steps: Some(starter.steps),
            shift: Some(ShiftPatch {
                choice: Some(starter.shift.choice),
                confirmed: Some(starter.shift.confirmed),
            }),
            contacts: Some(starter.contacts),
            notifications: Some(starter.notifications),
            created_at: Some(now),
            last_login_at: Some(now),
            ..RecordPatch::default()
        },
    )
    .await
}

/// Handles the `RecordLogin` command: stamps `lastLoginAt`.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the user has no record, or any
/// store error.
pub async fn handle_record_login(
    command: &RecordLogin,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    log_command(command);
    let ctx = RecordContext::new(&command.user_id, clock, store);
    ctx.require().await?;

    write(
        ctx,
        RecordPatch {
            last_login_at: Some(clock.now()),
            ..RecordPatch::default()
        },
    )
    .await
}

/// Handles the `SubmitApplication` command: marks the application step done
/// and recomputes the stage from the step list. An application that is
/// already submitted is left as is.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the user has no record, or any
/// store error.
pub async fn handle_submit_application(
    command: &SubmitApplication,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    log_command(command);
    let ctx = RecordContext::new(&command.user_id, clock, store);
    let current = ctx.require().await?;

    if current.is_step_done(StepId::Application) {
        info!(user_id = %command.user_id, "application already submitted, submit ignored");
        return Ok(unchanged(&command.user_id, current));
    }
    let steps = current.steps_with(StepId::Application, true);

    write(
        ctx,
        RecordPatch {
            stage: Some(next_stage(&steps)),
            steps: Some(steps),
            ..RecordPatch::default()
        },
    )
    .await
}

/// Handles the `SelectShift` command: writes the choice as unconfirmed. The
/// stage is not touched.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no shift was chosen,
/// `DomainError::RecordNotFound` if the user has no record, or any store
/// error.
pub async fn handle_select_shift(
    command: &SelectShift,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    if !command.choice.is_selected() {
        return Err(DomainError::Validation("a shift choice is required".into()));
    }
    log_command(command);
    let ctx = RecordContext::new(&command.user_id, clock, store);
    ctx.require().await?;

    write(
        ctx,
        RecordPatch {
            shift: Some(ShiftPatch {
                choice: Some(command.choice),
                confirmed: Some(false),
            }),
            ..RecordPatch::default()
        },
    )
    .await
}

/// Handles the `ConfirmShift` command: confirms the chosen shift, marks the
/// shift-selection step done and moves the stage to `onboarding`. Without a
/// chosen shift, or once the shift is confirmed, nothing is written.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the user has no record, or any
/// store error.
pub async fn handle_confirm_shift(
    command: &ConfirmShift,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    log_command(command);
    let ctx = RecordContext::new(&command.user_id, clock, store);
    let current = ctx.require().await?;

    if !current.shift.choice.is_selected() {
        info!(user_id = %command.user_id, "no shift selected, confirm ignored");
        return Ok(unchanged(&command.user_id, current));
    }
    if current.shift.confirmed {
        info!(user_id = %command.user_id, "shift already confirmed, confirm ignored");
        return Ok(unchanged(&command.user_id, current));
    }

    write(
        ctx,
        RecordPatch {
            stage: Some(Stage::Onboarding.into()),
            steps: Some(current.steps_with(StepId::ShiftSelection, true)),
            shift: Some(ShiftPatch {
                choice: None,
                confirmed: Some(true),
            }),
            ..RecordPatch::default()
        },
    )
    .await
}

/// Handles the `ToggleStep` command: flips the step, writes the whole step
/// list back and recomputes the stage from it.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the user has no record, or any
/// store error.
pub async fn handle_toggle_step(
    command: &ToggleStep,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<ProgressionCommandResult, DomainError> {
    log_command(command);
    let ctx = RecordContext::new(&command.user_id, clock, store);
    let current = ctx.require().await?;
    let steps = current.steps_with(command.step, !current.is_step_done(command.step));

    write(
        ctx,
        RecordPatch {
            stage: Some(next_stage(&steps)),
            steps: Some(steps),
            ..RecordPatch::default()
        },
    )
    .await
}
