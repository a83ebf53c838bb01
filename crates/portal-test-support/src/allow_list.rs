//! Test allow-list stores.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use portal_core::employee_id::EmployeeId;
use portal_core::error::DomainError;
use portal_core::store::{AllowListEntry, AllowListStore};

/// An allow-list backed by an ordered in-process map.
#[derive(Debug, Default)]
pub struct InMemoryAllowListStore {
    entries: Mutex<BTreeMap<EmployeeId, AllowListEntry>>,
}

impl InMemoryAllowListStore {
    /// Creates an empty allow-list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns `true` if the allow-list holds no entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AllowListStore for InMemoryAllowListStore {
    async fn upsert(
        &self,
        employee_id: &EmployeeId,
        entry: AllowListEntry,
    ) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .entry(employee_id.clone())
            .and_modify(|existing| existing.active = entry.active)
            .or_insert(entry);
        Ok(())
    }

    async fn remove(&self, employee_id: &EmployeeId) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(employee_id);
        Ok(())
    }

    async fn get(&self, employee_id: &EmployeeId) -> Result<Option<AllowListEntry>, DomainError> {
        Ok(self.entries.lock().unwrap().get(employee_id).copied())
    }

    async fn list(&self) -> Result<Vec<(EmployeeId, AllowListEntry)>, DomainError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(id, entry)| (id.clone(), *entry))
            .collect())
    }
}

/// An allow-list that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingAllowListStore;

#[async_trait]
impl AllowListStore for FailingAllowListStore {
    async fn upsert(
        &self,
        _employee_id: &EmployeeId,
        _entry: AllowListEntry,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn remove(&self, _employee_id: &EmployeeId) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn get(&self, _employee_id: &EmployeeId) -> Result<Option<AllowListEntry>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn list(&self) -> Result<Vec<(EmployeeId, AllowListEntry)>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
