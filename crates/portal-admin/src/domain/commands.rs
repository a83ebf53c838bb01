//! Commands for the Administration context.

use portal_core::command::Command;
use portal_core::employee_id::EmployeeId;
use portal_progression::domain::patch::AppointmentPatch;
use uuid::Uuid;

/// Command to edit the appointment of the employee with the given id.
#[derive(Debug, Clone)]
pub struct UpdateAppointment {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The normalized employee id to look up.
    pub employee_id: EmployeeId,
    /// The appointment fields to write.
    pub appointment: AppointmentPatch,
}

impl Command for UpdateAppointment {
    fn command_type(&self) -> &'static str {
        "admin.update_appointment"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        self.employee_id.as_str()
    }
}

/// Command to permit an employee id to register.
#[derive(Debug, Clone)]
pub struct AllowEmployee {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The normalized employee id.
    pub employee_id: EmployeeId,
}

impl Command for AllowEmployee {
    fn command_type(&self) -> &'static str {
        "admin.allow_employee"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        self.employee_id.as_str()
    }
}

/// Command to remove an employee id from the allow-list.
#[derive(Debug, Clone)]
pub struct RevokeEmployee {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The normalized employee id.
    pub employee_id: EmployeeId,
}

impl Command for RevokeEmployee {
    fn command_type(&self) -> &'static str {
        "admin.revoke_employee"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> &str {
        self.employee_id.as_str()
    }
}
