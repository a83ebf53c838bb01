//! Document store abstractions.
//!
//! The portal keeps one JSON document per user and a separate allow-list
//! collection. Writes are merge-patches that return nothing; callers that
//! need the result re-fetch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::employee_id::EmployeeId;
use crate::error::DomainError;

/// A stored onboarding document together with its key.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// The owning user's opaque identity id.
    pub id: String,
    /// The raw document body.
    pub body: serde_json::Value,
}

/// Repository for onboarding record documents.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the document stored under `id`, or `None` if absent.
    async fn fetch(&self, id: &str) -> Result<Option<serde_json::Value>, DomainError>;

    /// Merge `patch` into the document stored under `id`, creating the
    /// document if it does not exist.
    async fn merge(&self, id: &str, patch: serde_json::Value) -> Result<(), DomainError>;

    /// Find the single document whose `employeeId` equals `employee_id`.
    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<StoredRecord>, DomainError>;
}

/// An allow-list entry permitting an employee id to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowListEntry {
    /// Whether the entry currently permits registration.
    pub active: bool,
    /// When the entry was first written.
    pub created_at: DateTime<Utc>,
}

/// Repository for the administrator-owned allow-list.
#[async_trait]
pub trait AllowListStore: Send + Sync {
    /// Create the entry, or merge into an existing entry with the same key.
    /// Merging updates `active` and keeps the existing `created_at`.
    async fn upsert(&self, employee_id: &EmployeeId, entry: AllowListEntry)
    -> Result<(), DomainError>;

    /// Delete the entry. Deleting a missing key succeeds.
    async fn remove(&self, employee_id: &EmployeeId) -> Result<(), DomainError>;

    /// Fetch a single entry.
    async fn get(&self, employee_id: &EmployeeId) -> Result<Option<AllowListEntry>, DomainError>;

    /// List every entry ordered by key.
    async fn list(&self) -> Result<Vec<(EmployeeId, AllowListEntry)>, DomainError>;
}
