//! The ten screen renderers.
//!
//! Every renderer is a pure function of the record snapshot. The body it
//! returns is complete, so rendering twice from the same snapshot yields the
//! same screen.

use chrono::{DateTime, Utc};
use portal_progression::domain::progression::{stage_index, stage_indicator};
use portal_progression::domain::record::{OnboardingRecord, ShiftChoice, Stage, StepId};

use crate::domain::route::{Route, resolve};
use crate::domain::screen::{
    ActionSlot, Block, ChecklistItem, ContactCard, Detail, Header, InboxItem, Link, Screen,
    ShiftOption, Tone,
};

/// Documents an employee brings on day one.
const REQUIRED_DOCUMENTS: [(&str, &str); 4] = [
    ("photo_id", "Passport or photo ID"),
    ("proof_of_address", "Proof of address (dated within 3 months)"),
    ("bank_details", "Bank account details for payroll"),
    ("tax_form", "Completed tax declaration form"),
];

const FAQ: [(&str, &str); 4] = [
    (
        "Can I change my shift?",
        "Yes, until it is confirmed. After that, ask your shift lead.",
    ),
    (
        "Who sets my appointment?",
        "The onboarding team schedules it and it appears on the Appointment screen.",
    ),
    (
        "What should I wear on day one?",
        "Comfortable clothes and closed-toe shoes. Safety gear is provided on site.",
    ),
    (
        "I lost my documents checklist.",
        "It is always available on the Documents screen.",
    ),
];

struct Page {
    header: Header,
    body: Vec<Block>,
    actions: Vec<ActionSlot>,
}

/// Renders `route` from `record`.
#[must_use]
pub fn render(route: Route, record: &OnboardingRecord) -> Screen {
    let page = match route {
        Route::Progress => progress(record),
        Route::Application => application(record),
        Route::Shift => shift(record),
        Route::Docs => docs(record),
        Route::Appointment => appointment(record),
        Route::FirstDay => first_day(record),
        Route::Contacts => contacts(record),
        Route::Inbox => inbox(record),
        Route::Profile => profile(record),
        Route::Help => help(),
    };
    Screen {
        route,
        header: page.header,
        stages: stage_indicator(&record.stage),
        body: page.body,
        actions: page.actions,
    }
}

/// The screen that completes a given step.
fn route_for_step(step_id: &str) -> Route {
    match StepId::from_token(step_id) {
        Some(StepId::Application) => Route::Application,
        Some(StepId::ShiftSelection) => Route::Shift,
        Some(StepId::Docs) => Route::Docs,
        Some(StepId::FirstDay) => Route::FirstDay,
        None => Route::Progress,
    }
}

fn format_timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "-".to_owned(), |at| at.format("%d %b %Y %H:%M UTC").to_string())
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

fn toggle_slot(
    record: &OnboardingRecord,
    step: StepId,
    done_label: &str,
    undo_label: &str,
) -> ActionSlot {
    let label = if record.is_step_done(step) {
        undo_label
    } else {
        done_label
    };
    ActionSlot {
        action: "toggle_step",
        label: label.to_owned(),
        enabled: true,
        target: Some(step.as_str()),
    }
}

fn progress(record: &OnboardingRecord) -> Page {
    let stage = Stage::ORDERED[stage_index(record.stage.as_str())];
    let header = Header::new(
        "Your onboarding",
        format!("Stage {} of 4: {}", stage.index() + 1, stage.label()),
    );

    let mut body = Vec::new();
    if record.steps.is_empty() {
        body.push(Block::notice(Tone::Info, "Your checklist has not been set up yet."));
    } else {
        body.push(Block::Checklist {
            items: record
                .steps
                .iter()
                .map(|step| ChecklistItem {
                    id: step.id.clone(),
                    label: step.label.clone(),
                    done: step.done,
                })
                .collect(),
        });
    }

    let open: Vec<Link> = record
        .steps
        .iter()
        .filter(|step| !step.done)
        .map(|step| Link::new(step.label.clone(), route_for_step(&step.id)))
        .collect();
    if open.is_empty() && !record.steps.is_empty() {
        body.push(Block::notice(Tone::Success, "You're all set. See you on site!"));
    } else if !open.is_empty() {
        body.push(Block::Links { links: open });
    }

    Page {
        header,
        body,
        actions: Vec::new(),
    }
}

fn application(record: &OnboardingRecord) -> Page {
    let submitted = record.is_step_done(StepId::Application);
    let header = Header::new(
        "Application",
        if submitted {
            "Submitted"
        } else {
            "Not yet submitted"
        },
    );
    let notice = if submitted {
        Block::notice(Tone::Success, "We have your application. Next, choose a shift.")
    } else {
        Block::notice(
            Tone::Warning,
            "Check your details below and submit your application.",
        )
    };
    let mut body = vec![
        Block::Details {
            rows: vec![
                Detail::new("Employee ID", or_dash(&record.employee_id)),
                Detail::new("Email", or_dash(&record.email)),
            ],
        },
        notice,
    ];
    if submitted {
        body.push(Block::Links {
            links: vec![Link::new("Choose your shift", Route::Shift)],
        });
    }

    Page {
        header,
        body,
        actions: vec![ActionSlot {
            action: "submit_application",
            label: "Submit application".to_owned(),
            enabled: !submitted,
            target: None,
        }],
    }
}

fn shift(record: &OnboardingRecord) -> Page {
    let shift = record.shift;
    let subtitle = match (shift.choice.is_selected(), shift.confirmed) {
        (false, _) => "No shift selected".to_owned(),
        (true, false) => format!("Selected: {}, not yet confirmed", shift.choice.label()),
        (true, true) => format!("Confirmed: {}", shift.choice.label()),
    };

    let options = ShiftChoice::OPTIONS
        .into_iter()
        .map(|choice| ShiftOption {
            choice: choice.as_str(),
            label: choice.label(),
            hours: choice.hours(),
            selected: shift.choice == choice,
        })
        .collect();

    let mut actions: Vec<ActionSlot> = ShiftChoice::OPTIONS
        .into_iter()
        .map(|choice| ActionSlot {
            action: "select_shift",
            label: format!("{} ({})", choice.label(), choice.hours()),
            enabled: true,
            target: Some(choice.as_str()),
        })
        .collect();
    actions.push(ActionSlot {
        action: "confirm_shift",
        label: "Confirm shift".to_owned(),
        enabled: shift.choice.is_selected() && !shift.confirmed,
        target: None,
    });

    Page {
        header: Header::new("Choose your shift", subtitle),
        body: vec![Block::ShiftOptions {
            options,
            confirmed: shift.confirmed,
        }],
        actions,
    }
}

fn docs(record: &OnboardingRecord) -> Page {
    let ready = record.is_step_done(StepId::Docs);
    let header = Header::new(
        "Documents",
        if ready {
            "Ready for day one"
        } else {
            "Bring these on your first day"
        },
    );
    let body = vec![
        Block::Checklist {
            items: REQUIRED_DOCUMENTS
                .iter()
                .map(|(id, label)| ChecklistItem {
                    id: (*id).to_owned(),
                    label: (*label).to_owned(),
                    done: ready,
                })
                .collect(),
        },
        Block::notice(
            Tone::Info,
            "Originals only. Copies are made on site and returned to you.",
        ),
    ];

    Page {
        header,
        body,
        actions: vec![toggle_slot(
            record,
            StepId::Docs,
            "My documents are ready",
            "My documents are not ready",
        )],
    }
}

fn appointment(record: &OnboardingRecord) -> Page {
    let appointment = &record.appointment;
    if !appointment.is_scheduled() {
        return Page {
            header: Header::new("Appointment", "Not yet scheduled"),
            body: vec![Block::notice(
                Tone::Info,
                "Your appointment has not been scheduled yet. It will appear here once it is.",
            )],
            actions: Vec::new(),
        };
    }

    let subtitle = if appointment.time.trim().is_empty() {
        appointment.date.clone()
    } else {
        format!("{} at {}", appointment.date, appointment.time)
    };
    let mut body = vec![Block::Details {
        rows: vec![
            Detail::new("Date", or_dash(&appointment.date)),
            Detail::new("Time", or_dash(&appointment.time)),
            Detail::new("Address", or_dash(&appointment.address)),
        ],
    }];
    if !appointment.notes.trim().is_empty() {
        body.push(Block::notice(Tone::Info, appointment.notes.clone()));
    }

    Page {
        header: Header::new("Appointment", subtitle),
        body,
        actions: Vec::new(),
    }
}

fn first_day(record: &OnboardingRecord) -> Page {
    let done = record.is_step_done(StepId::FirstDay);
    let header = Header::new(
        "Your first day",
        if done {
            "Completed"
        } else {
            "What to expect"
        },
    );
    let shift = if record.shift.choice.is_selected() {
        format!("{} ({})", record.shift.choice.label(), record.shift.choice.hours())
    } else {
        "Not selected yet".to_owned()
    };
    let body = vec![
        Block::Details {
            rows: vec![
                Detail::new("Shift", shift),
                Detail::new("Report to", or_dash(&record.contacts.shift_lead.name)),
                Detail::new("Address", or_dash(&record.appointment.address)),
            ],
        },
        Block::Checklist {
            items: vec![
                ChecklistItem {
                    id: "arrive_early".to_owned(),
                    label: "Arrive 15 minutes before your shift".to_owned(),
                    done,
                },
                ChecklistItem {
                    id: "safety_briefing".to_owned(),
                    label: "Attend the safety briefing".to_owned(),
                    done,
                },
                ChecklistItem {
                    id: "collect_badge".to_owned(),
                    label: "Collect your badge and locker key".to_owned(),
                    done,
                },
            ],
        },
        Block::Links {
            links: vec![
                Link::new("Documents to bring", Route::Docs),
                Link::new("Who to ask", Route::Contacts),
            ],
        },
    ];

    Page {
        header,
        body,
        actions: vec![toggle_slot(
            record,
            StepId::FirstDay,
            "I completed my first day",
            "I have not completed my first day",
        )],
    }
}

fn contacts(record: &OnboardingRecord) -> Page {
    let cards: Vec<ContactCard> = record
        .contacts
        .by_role()
        .into_iter()
        .filter(|(_, contact)| !contact.name.trim().is_empty())
        .map(|(role, contact)| ContactCard {
            role,
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            email: contact.email.clone(),
        })
        .collect();

    let body = if cards.is_empty() {
        vec![Block::notice(Tone::Info, "Your contacts have not been assigned yet.")]
    } else {
        vec![Block::ContactCards { cards }]
    };

    Page {
        header: Header::new("Contacts", "Who to ask"),
        body,
        actions: Vec::new(),
    }
}

fn inbox(record: &OnboardingRecord) -> Page {
    let count = record.notifications.len();
    let subtitle = match count {
        0 => "No messages".to_owned(),
        1 => "1 message".to_owned(),
        n => format!("{n} messages"),
    };
    let body = if count == 0 {
        vec![Block::notice(Tone::Info, "Nothing here yet.")]
    } else {
        vec![Block::Inbox {
            items: record
                .notifications
                .iter()
                .map(|notification| InboxItem {
                    id: notification.id.clone(),
                    title: notification.title.clone(),
                    body: notification.body.clone(),
                    action: notification.action.clone(),
                    route: resolve(Some(&notification.route)).route(),
                })
                .collect(),
        }]
    };

    Page {
        header: Header::new("Inbox", subtitle),
        body,
        actions: Vec::new(),
    }
}

fn profile(record: &OnboardingRecord) -> Page {
    let subtitle = if record.email.trim().is_empty() {
        "Account details".to_owned()
    } else {
        record.email.clone()
    };
    Page {
        header: Header::new("Profile", subtitle),
        body: vec![Block::Details {
            rows: vec![
                Detail::new("Employee ID", or_dash(&record.employee_id)),
                Detail::new("Email", or_dash(&record.email)),
                Detail::new("Member since", format_timestamp(record.created_at)),
                Detail::new("Last sign-in", format_timestamp(record.last_login_at)),
                Detail::new("Last updated", format_timestamp(record.updated_at)),
            ],
        }],
        actions: Vec::new(),
    }
}

fn help() -> Page {
    Page {
        header: Header::new("Help", "Common questions"),
        body: vec![
            Block::Details {
                rows: FAQ
                    .iter()
                    .map(|(question, answer)| Detail::new(*question, *answer))
                    .collect(),
            },
            Block::Links {
                links: vec![Link::new("Still stuck? Contact us", Route::Contacts)],
            },
        ],
        actions: Vec::new(),
    }
}
