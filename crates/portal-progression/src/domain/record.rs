//! The onboarding record: one JSON document per user.
//!
//! Every field carries an explicit default, so a document with missing fields
//! loads as the typed default instead of failing. Conversion from the raw
//! document happens once, in [`OnboardingRecord::from_document`].

use chrono::{DateTime, Utc};
use portal_core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::seed;

/// The four coarse onboarding phases, in progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Filling in and submitting the application.
    Application,
    /// Choosing and confirming a shift.
    ShiftSelection,
    /// Paperwork and first-day preparation.
    Onboarding,
    /// Onboarding finished.
    StartWorking,
}

impl Stage {
    /// Every stage, in progression order.
    pub const ORDERED: [Self; 4] = [
        Self::Application,
        Self::ShiftSelection,
        Self::Onboarding,
        Self::StartWorking,
    ];

    /// The stored string form of the stage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::ShiftSelection => "shift_selection",
            Self::Onboarding => "onboarding",
            Self::StartWorking => "start_working",
        }
    }

    /// Human-readable label for the stage indicator.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Application => "Application",
            Self::ShiftSelection => "Shift selection",
            Self::Onboarding => "Onboarding",
            Self::StartWorking => "Start working",
        }
    }

    /// Zero-based position in [`Stage::ORDERED`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Application => 0,
            Self::ShiftSelection => 1,
            Self::Onboarding => 2,
            Self::StartWorking => 3,
        }
    }

    /// Parses a stored stage value. Only exact canonical strings match.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|stage| stage.as_str() == token)
    }
}

/// The stage value as stored on the record.
///
/// The stored value is advisory and is written by each screen on save, so it
/// is kept verbatim even when it is not one of the canonical stages (the
/// next-incomplete-step rule can produce step ids such as `docs`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageMarker(String);

impl StageMarker {
    /// Wraps a raw stored value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw stored value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The canonical stage this value names, if any.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        Stage::from_token(&self.0)
    }
}

impl Default for StageMarker {
    fn default() -> Self {
        Stage::Application.into()
    }
}

impl From<Stage> for StageMarker {
    fn from(stage: Stage) -> Self {
        Self(stage.as_str().to_owned())
    }
}

/// The canonical checklist steps, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    /// Application submitted.
    Application,
    /// Shift chosen and confirmed.
    ShiftSelection,
    /// Documents ready for the first day.
    Docs,
    /// First day completed.
    FirstDay,
}

impl StepId {
    /// Every canonical step, in canonical order.
    pub const CANONICAL: [Self; 4] = [
        Self::Application,
        Self::ShiftSelection,
        Self::Docs,
        Self::FirstDay,
    ];

    /// The id stored on the step.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::ShiftSelection => "shift_selection",
            Self::Docs => "docs",
            Self::FirstDay => "first_day",
        }
    }

    /// Default checklist label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Application => "Submit your application",
            Self::ShiftSelection => "Choose and confirm your shift",
            Self::Docs => "Get your documents ready",
            Self::FirstDay => "Complete your first day",
        }
    }

    /// Parses a stored step id.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::CANONICAL.into_iter().find(|step| step.as_str() == token)
    }
}

/// One checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Unique within the record.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Completion flag.
    pub done: bool,
}

impl Step {
    /// Builds the not-yet-done canonical step.
    #[must_use]
    pub fn canonical(id: StepId) -> Self {
        Self {
            id: id.as_str().to_owned(),
            label: id.label().to_owned(),
            done: false,
        }
    }
}

/// The shift a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftChoice {
    /// Nothing chosen yet; stored as the empty string.
    #[default]
    Unselected,
    /// Early shift.
    Early,
    /// Mid shift.
    Mid,
    /// Late shift.
    Late,
}

impl ShiftChoice {
    /// The selectable shifts, in display order.
    pub const OPTIONS: [Self; 3] = [Self::Early, Self::Mid, Self::Late];

    /// The stored string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unselected => "",
            Self::Early => "early",
            Self::Mid => "mid",
            Self::Late => "late",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Unselected => "Not selected",
            Self::Early => "Early",
            Self::Mid => "Mid",
            Self::Late => "Late",
        }
    }

    /// Working hours shown next to the option.
    #[must_use]
    pub fn hours(self) -> &'static str {
        match self {
            Self::Unselected => "",
            Self::Early => "06:00 - 14:30",
            Self::Mid => "10:00 - 18:30",
            Self::Late => "14:00 - 22:30",
        }
    }

    /// Parses a stored choice.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "" => Some(Self::Unselected),
            "early" => Some(Self::Early),
            "mid" => Some(Self::Mid),
            "late" => Some(Self::Late),
            _ => None,
        }
    }

    /// Returns `true` for every choice except [`ShiftChoice::Unselected`].
    #[must_use]
    pub fn is_selected(self) -> bool {
        self != Self::Unselected
    }
}

impl Serialize for ShiftChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShiftChoice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        ShiftChoice::from_token(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown shift choice: {raw:?}")))
    }
}

/// The user's shift selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Shift {
    /// The chosen shift.
    pub choice: ShiftChoice,
    /// Whether the choice was confirmed. Only ever `true` with a choice.
    pub confirmed: bool,
}

/// Appointment details set by an administrator. All empty means "not yet
/// scheduled".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    /// Free-form date.
    pub date: String,
    /// Free-form time.
    pub time: String,
    /// Where to go.
    pub address: String,
    /// Anything else the employee should know.
    pub notes: String,
}

impl Appointment {
    /// Whether an administrator has scheduled the appointment.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        !self.date.trim().is_empty()
    }
}

/// A person to reach out to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Full name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
}

/// The four fixed contact roles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contacts {
    /// Site manager.
    pub site_manager: Contact,
    /// Shift lead.
    pub shift_lead: Contact,
    /// Human resources.
    pub hr: Contact,
    /// Health and safety officer.
    pub safety: Contact,
}

impl Contacts {
    /// Each role with its display label, in display order.
    #[must_use]
    pub fn by_role(&self) -> [(&'static str, &Contact); 4] {
        [
            ("Site manager", &self.site_manager),
            ("Shift lead", &self.shift_lead),
            ("HR", &self.hr),
            ("Safety", &self.safety),
        ]
    }
}

/// An inbox item pointing at a screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    /// Unique within the record.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Message text.
    pub body: String,
    /// Call-to-action label.
    pub action: String,
    /// Navigation token of the screen the action opens.
    pub route: String,
}

/// One user's onboarding state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OnboardingRecord {
    /// Normalized employee identifier the user registered with.
    pub employee_id: String,
    /// Email captured at registration.
    pub email: String,
    /// Advisory stage; see [`StageMarker`].
    pub stage: StageMarker,
    /// Checklist, in display order.
    pub steps: Vec<Step>,
    /// Shift selection.
    pub shift: Shift,
    /// Appointment details.
    pub appointment: Appointment,
    /// Fixed contact roles.
    pub contacts: Contacts,
    /// Inbox.
    pub notifications: Vec<Notification>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last written.
    pub updated_at: Option<DateTime<Utc>>,
    /// When the user last completed sign-in.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Default for OnboardingRecord {
    fn default() -> Self {
        Self {
            employee_id: String::new(),
            email: String::new(),
            stage: StageMarker::default(),
            steps: StepId::CANONICAL.into_iter().map(Step::canonical).collect(),
            shift: Shift::default(),
            appointment: Appointment::default(),
            contacts: Contacts::default(),
            notifications: Vec::new(),
            created_at: None,
            updated_at: None,
            last_login_at: None,
        }
    }
}

impl OnboardingRecord {
    /// Validates a raw document into a typed record.
    ///
    /// Missing fields take their defaults. A confirmed shift without a choice
    /// is loaded as unconfirmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the document is not an object
    /// or a present field has the wrong shape.
    pub fn from_document(document: serde_json::Value) -> Result<Self, DomainError> {
        if !document.is_object() {
            return Err(DomainError::Infrastructure(
                "onboarding record is not a JSON object".into(),
            ));
        }
        let mut record: Self = serde_json::from_value(document).map_err(|e| {
            DomainError::Infrastructure(format!("onboarding record deserialization failed: {e}"))
        })?;
        if !record.shift.choice.is_selected() {
            record.shift.confirmed = false;
        }
        Ok(record)
    }

    /// The fixed demonstration record shown when no real record can be
    /// loaded.
    #[must_use]
    pub fn demo() -> Self {
        seed::demo_record()
    }

    /// The step stored under `id`, if present.
    #[must_use]
    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id.as_str())
    }

    /// Whether the step stored under `id` is present and done.
    #[must_use]
    pub fn is_step_done(&self, id: StepId) -> bool {
        self.step(id).is_some_and(|step| step.done)
    }

    /// Returns a copy of the step list with `id` set to `done`. A canonical
    /// step missing from the list is appended.
    #[must_use]
    pub fn steps_with(&self, id: StepId, done: bool) -> Vec<Step> {
        let mut steps = self.steps.clone();
        match steps.iter_mut().find(|step| step.id == id.as_str()) {
            Some(step) => step.done = done,
            None => steps.push(Step {
                done,
                ..Step::canonical(id)
            }),
        }
        steps
    }
}
