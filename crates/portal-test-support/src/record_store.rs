//! Test record stores: `RecordStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use portal_core::employee_id::EmployeeId;
use portal_core::error::DomainError;
use portal_core::patch::merge_patch;
use portal_core::store::{RecordStore, StoredRecord};
use serde_json::Value;

/// A record store backed by an in-process map. Applies the same merge-patch
/// semantics as the real store and records every patch it receives.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    documents: Mutex<BTreeMap<String, Value>>,
    patches: Mutex<Vec<(String, Value)>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with one document.
    #[must_use]
    pub fn with_document(id: &str, body: Value) -> Self {
        let store = Self::new();
        store.documents.lock().unwrap().insert(id.to_owned(), body);
        store
    }

    /// Returns the current body stored under `id`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn document(&self, id: &str) -> Option<Value> {
        self.documents.lock().unwrap().get(id).cloned()
    }

    /// Returns a snapshot of every `(id, patch)` pair merged so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn patches(&self) -> Vec<(String, Value)> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch(&self, id: &str) -> Result<Option<Value>, DomainError> {
        Ok(self.documents.lock().unwrap().get(id).cloned())
    }

    async fn merge(&self, id: &str, patch: Value) -> Result<(), DomainError> {
        let mut documents = self.documents.lock().unwrap();
        let document = documents.entry(id.to_owned()).or_insert(Value::Null);
        merge_patch(document, &patch);
        self.patches.lock().unwrap().push((id.to_owned(), patch));
        Ok(())
    }

    async fn find_by_employee_id(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|(_, body)| {
                body.get("employeeId").and_then(Value::as_str) == Some(employee_id.as_str())
            })
            .map(|(id, body)| StoredRecord {
                id: id.clone(),
                body: body.clone(),
            }))
    }
}

/// A record store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRecordStore;

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn fetch(&self, _id: &str) -> Result<Option<Value>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn merge(&self, _id: &str, _patch: Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_employee_id(
        &self,
        _employee_id: &EmployeeId,
    ) -> Result<Option<StoredRecord>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
