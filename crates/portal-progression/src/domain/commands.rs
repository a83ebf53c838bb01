//! Commands for the Record & Progression context.

use portal_core::command::Command;
use portal_core::employee_id::EmployeeId;
use uuid::Uuid;

use super::record::{ShiftChoice, StepId};

/// Command to create the record of a newly registered user.
#[derive(Debug, Clone)]
pub struct RegisterEmployee {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
    /// The user's identity email.
    pub email: String,
    /// The allow-listed employee id the user registered with.
    pub employee_id: EmployeeId,
}

impl Command for RegisterEmployee {
    fn command_type(&self) -> &'static str {
        "progression.register_employee"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}

/// Command to stamp a completed sign-in on an existing record.
#[derive(Debug, Clone)]
pub struct RecordLogin {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
}

impl Command for RecordLogin {
    fn command_type(&self) -> &'static str {
        "progression.record_login"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}

/// Command to submit the application.
#[derive(Debug, Clone)]
pub struct SubmitApplication {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
}

impl Command for SubmitApplication {
    fn command_type(&self) -> &'static str {
        "progression.submit_application"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}

/// Command to pick a shift (unconfirmed).
#[derive(Debug, Clone)]
pub struct SelectShift {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
    /// The chosen shift.
    pub choice: ShiftChoice,
}

impl Command for SelectShift {
    fn command_type(&self) -> &'static str {
        "progression.select_shift"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}

/// Command to confirm the currently selected shift.
#[derive(Debug, Clone)]
pub struct ConfirmShift {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
}

impl Command for ConfirmShift {
    fn command_type(&self) -> &'static str {
        "progression.confirm_shift"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}

/// Command to flip one checklist step.
#[derive(Debug, Clone)]
pub struct ToggleStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user's identity id.
    pub user_id: String,
    /// The step to flip.
    pub step: StepId,
}

impl Command for ToggleStep {
    fn command_type(&self) -> &'static str {
        "progression.toggle_step"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        &self.user_id
    }
}
