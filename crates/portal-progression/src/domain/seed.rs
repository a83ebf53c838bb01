//! Built-in record content: the starter contacts and inbox every new record
//! receives, and the demonstration record used for preview sessions and load
//! failures.

use super::record::{
    Appointment, Contact, Contacts, Notification, OnboardingRecord, Shift, Stage, StepId,
};

fn contact(name: &str, phone: &str, email: &str) -> Contact {
    Contact {
        name: name.to_owned(),
        phone: phone.to_owned(),
        email: email.to_owned(),
    }
}

fn notification(id: &str, title: &str, body: &str, action: &str, route: &str) -> Notification {
    Notification {
        id: id.to_owned(),
        title: title.to_owned(),
        body: body.to_owned(),
        action: action.to_owned(),
        route: route.to_owned(),
    }
}

/// Contacts seeded onto every new record.
#[must_use]
pub fn starter_contacts() -> Contacts {
    Contacts {
        site_manager: contact("Site Manager", "+1 555 0100", "site.manager@example.com"),
        shift_lead: contact("Shift Lead", "+1 555 0101", "shift.lead@example.com"),
        hr: contact("People Team", "+1 555 0102", "hr@example.com"),
        safety: contact("Safety Officer", "+1 555 0103", "safety@example.com"),
    }
}

/// Inbox seeded onto every new record.
#[must_use]
pub fn starter_notifications() -> Vec<Notification> {
    vec![
        notification(
            "welcome",
            "Welcome aboard",
            "Your account is ready. Follow the checklist to finish onboarding.",
            "View progress",
            "progress",
        ),
        notification(
            "pick-shift",
            "Pick your shift",
            "Choose the shift that suits you and confirm it.",
            "Choose a shift",
            "shift",
        ),
        notification(
            "documents",
            "Bring your documents",
            "Photo ID, proof of address and bank details are needed on day one.",
            "See document checklist",
            "docs",
        ),
    ]
}

/// A freshly registered record.
#[must_use]
pub fn starter_record(employee_id: &str, email: &str) -> OnboardingRecord {
    OnboardingRecord {
        employee_id: employee_id.to_owned(),
        email: email.to_owned(),
        contacts: starter_contacts(),
        notifications: starter_notifications(),
        ..OnboardingRecord::default()
    }
}

pub(crate) fn demo_record() -> OnboardingRecord {
    let mut record = starter_record("DEMO001", "preview@example.com");
    record.steps = record.steps_with(StepId::Application, true);
    record.stage = Stage::ShiftSelection.into();
    record.shift = Shift::default();
    record.appointment = Appointment {
        date: "Monday 2 February".to_owned(),
        time: "09:00".to_owned(),
        address: "Unit 4, Riverside Distribution Park".to_owned(),
        notes: "Ask for the shift lead at reception.".to_owned(),
    };
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_record_has_canonical_steps_all_open() {
        let record = starter_record("AB12", "new.starter@example.com");

        let ids: Vec<&str> = record.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["application", "shift_selection", "docs", "first_day"]);
        assert!(record.steps.iter().all(|s| !s.done));
        assert_eq!(record.stage.stage(), Some(Stage::Application));
        assert_eq!(record.notifications.len(), 3);
    }

    #[test]
    fn test_demo_record_is_stable() {
        assert_eq!(OnboardingRecord::demo(), OnboardingRecord::demo());
        assert!(OnboardingRecord::demo().is_step_done(StepId::Application));
    }
}
