//! Typed partial updates to an onboarding record.
//!
//! A patch only names the sub-trees it writes; everything left `None` is
//! omitted from the serialized document and untouched by the merge.

use chrono::{DateTime, Utc};
use portal_core::clock::{Clock, to_server_timestamp};
use portal_core::error::DomainError;
use serde::{Deserialize, Serialize, Serializer};

use super::record::{Contacts, Notification, ShiftChoice, StageMarker, Step};

#[allow(clippy::ref_option)]
fn server_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(at) => serializer.serialize_str(&to_server_timestamp(*at)),
        None => serializer.serialize_none(),
    }
}

/// Partial update of the shift sub-tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShiftPatch {
    /// New choice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice: Option<ShiftChoice>,
    /// New confirmation flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

/// Partial update of the appointment sub-tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentPatch {
    /// New date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// New time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// New address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentPatch {
    /// Whether the patch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.time.is_none() && self.address.is_none() && self.notes.is_none()
    }
}

/// A partial update of an onboarding record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    /// Employee identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Stage value, written explicitly by the screen that saves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageMarker>,
    /// The whole step list; steps are always written back in full.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    /// Shift sub-tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftPatch>,
    /// Appointment sub-tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<AppointmentPatch>,
    /// Contacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Contacts>,
    /// Inbox.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Vec<Notification>>,
    /// Creation timestamp.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "server_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Update timestamp; set by [`RecordPatch::stamped`].
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "server_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Sign-in timestamp.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "server_timestamp"
    )]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl RecordPatch {
    /// Returns the patch with `updatedAt` set to the clock's current time.
    #[must_use]
    pub fn stamped(mut self, clock: &dyn Clock) -> Self {
        self.updated_at = Some(clock.now());
        self
    }

    /// Serializes the patch into the JSON merge document sent to the store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if serialization fails.
    pub fn to_document(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::Infrastructure(format!("patch serialization failed: {e}")))
    }
}
