//! Query handlers for the Administration context.

use chrono::{DateTime, Utc};
use portal_core::employee_id::EmployeeId;
use portal_core::error::DomainError;
use portal_core::store::{AllowListStore, RecordStore};
use portal_progression::domain::record::OnboardingRecord;
use serde::Serialize;
use tracing::debug;

/// An employee's record together with the key it is stored under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    /// The owning user's identity id.
    pub record_id: String,
    /// The record.
    pub record: OnboardingRecord,
}

/// Read-only view of one allow-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowListEntryView {
    /// The normalized employee id.
    pub employee_id: EmployeeId,
    /// Whether the entry permits registration.
    pub active: bool,
    /// When the entry was first written.
    pub created_at: DateTime<Utc>,
}

/// Whether an employee id may register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationStatus {
    /// The normalized employee id that was checked.
    pub employee_id: EmployeeId,
    /// `true` if an active allow-list entry exists.
    pub allowed: bool,
}

/// Looks up the single record registered with `employee_id`.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if no record carries the id, or
/// `DomainError::Infrastructure` if the lookup fails or the stored document
/// is malformed.
pub async fn find_employee(
    employee_id: &EmployeeId,
    store: &dyn RecordStore,
) -> Result<EmployeeView, DomainError> {
    let stored = store
        .find_by_employee_id(employee_id)
        .await?
        .ok_or_else(|| DomainError::RecordNotFound(employee_id.to_string()))?;
    debug!(employee_id = %employee_id, record_id = %stored.id, "employee found");
    Ok(EmployeeView {
        record: OnboardingRecord::from_document(stored.body)?,
        record_id: stored.id,
    })
}

/// Lists every allow-list entry ordered by employee id. An empty list is a
/// normal result.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_allow_list(
    allow_list: &dyn AllowListStore,
) -> Result<Vec<AllowListEntryView>, DomainError> {
    let mut entries: Vec<AllowListEntryView> = allow_list
        .list()
        .await?
        .into_iter()
        .map(|(employee_id, entry)| AllowListEntryView {
            employee_id,
            active: entry.active,
            created_at: entry.created_at,
        })
        .collect();
    entries.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
    Ok(entries)
}

/// Reports whether `employee_id` has an active allow-list entry.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn check_registration(
    employee_id: &EmployeeId,
    allow_list: &dyn AllowListStore,
) -> Result<RegistrationStatus, DomainError> {
    let allowed = allow_list
        .get(employee_id)
        .await?
        .is_some_and(|entry| entry.active);
    Ok(RegistrationStatus {
        employee_id: employee_id.clone(),
        allowed,
    })
}

/// Fails unless `employee_id` has an active allow-list entry.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` if the id is not allowed, or
/// `DomainError::Infrastructure` if the store fails.
pub async fn ensure_registration_allowed(
    employee_id: &EmployeeId,
    allow_list: &dyn AllowListStore,
) -> Result<(), DomainError> {
    if check_registration(employee_id, allow_list).await?.allowed {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!(
            "employee id {employee_id} is not permitted to register"
        )))
    }
}
