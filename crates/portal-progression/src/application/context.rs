//! The record capability handed to every screen action.
//!
//! A [`RecordContext`] bundles the user's record key with the store and the
//! clock. It is the only path by which the portal reads or writes a record,
//! and every write goes through [`RecordContext::patch_and_reload`]: the
//! patch is stamped and merged, then the whole record is read back from the
//! store. Nothing is updated optimistically, so the returned record is always
//! what the store holds after the write.

use portal_core::clock::Clock;
use portal_core::error::DomainError;
use portal_core::store::RecordStore;
use tracing::{debug, warn};

use crate::domain::patch::RecordPatch;
use crate::domain::record::OnboardingRecord;

/// Read/write access to one user's onboarding record.
#[derive(Clone, Copy)]
pub struct RecordContext<'a> {
    user_id: &'a str,
    clock: &'a dyn Clock,
    store: &'a dyn RecordStore,
}

impl std::fmt::Debug for RecordContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordContext")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

impl<'a> RecordContext<'a> {
    /// Creates a context for the record stored under `user_id`.
    #[must_use]
    pub fn new(user_id: &'a str, clock: &'a dyn Clock, store: &'a dyn RecordStore) -> Self {
        Self {
            user_id,
            clock,
            store,
        }
    }

    /// The record key.
    #[must_use]
    pub fn user_id(&self) -> &'a str {
        self.user_id
    }

    /// The clock used to stamp writes.
    #[must_use]
    pub fn clock(&self) -> &'a dyn Clock {
        self.clock
    }

    /// Loads the record, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store fails or the
    /// document does not validate.
    pub async fn load(&self) -> Result<Option<OnboardingRecord>, DomainError> {
        self.store
            .fetch(self.user_id)
            .await?
            .map(OnboardingRecord::from_document)
            .transpose()
    }

    /// Loads the record, failing with `RecordNotFound` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RecordNotFound` if no record exists, or any
    /// error from [`RecordContext::load`].
    pub async fn require(&self) -> Result<OnboardingRecord, DomainError> {
        self.load()
            .await?
            .ok_or_else(|| DomainError::RecordNotFound(self.user_id.to_owned()))
    }

    /// Loads the record for display. A missing or unreadable record is
    /// replaced by the demonstration record so a screen always renders.
    pub async fn load_or_demo(&self) -> OnboardingRecord {
        match self.load().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(user_id = %self.user_id, "no onboarding record, showing demo record");
                OnboardingRecord::demo()
            }
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "failed to load onboarding record, showing demo record");
                OnboardingRecord::demo()
            }
        }
    }

    /// Stamps `patch` with a fresh `updatedAt`, merges it into the store and
    /// returns the record re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the write or the reload
    /// fails; nothing is rolled back. Returns `DomainError::RecordNotFound`
    /// if the record vanished between the write and the reload.
    pub async fn patch_and_reload(&self, patch: RecordPatch) -> Result<OnboardingRecord, DomainError> {
        let document = patch.stamped(self.clock).to_document()?;
        debug!(user_id = %self.user_id, patch = %document, "merging record patch");
        self.store.merge(self.user_id, document).await?;
        self.require().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use portal_test_support::{
        FailingRecordStore, FixedClock, InMemoryRecordStore, SteppingClock, fixed_now,
    };
    use serde_json::json;

    use super::*;
    use crate::domain::patch::ShiftPatch;
    use crate::domain::record::ShiftChoice;

    #[tokio::test]
    async fn test_patch_and_reload_returns_store_state_with_advanced_timestamp() {
        // Arrange
        let store = InMemoryRecordStore::with_document(
            "user-1",
            json!({ "updatedAt": "2026-01-15T09:00:00.000Z", "shift": { "choice": "late" } }),
        );
        let clock = SteppingClock::new(fixed_now(), Duration::minutes(5));
        let ctx = RecordContext::new("user-1", &clock, &store);
        let before = ctx.require().await.unwrap();

        // Act
        let after = ctx
            .patch_and_reload(RecordPatch {
                shift: Some(ShiftPatch {
                    choice: Some(ShiftChoice::Early),
                    confirmed: Some(false),
                }),
                ..RecordPatch::default()
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(after.shift.choice, ShiftChoice::Early);
        assert!(!after.shift.confirmed);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.updated_at, Some(fixed_now()));
        assert_eq!(store.patches().len(), 1);
    }

    #[tokio::test]
    async fn test_patch_and_reload_leaves_other_subtrees_untouched() {
        let store = InMemoryRecordStore::with_document(
            "user-1",
            json!({ "appointment": { "date": "Friday", "time": "09:00" } }),
        );
        let clock = FixedClock(fixed_now());
        let ctx = RecordContext::new("user-1", &clock, &store);

        let record = ctx
            .patch_and_reload(RecordPatch {
                shift: Some(ShiftPatch {
                    choice: Some(ShiftChoice::Mid),
                    confirmed: None,
                }),
                ..RecordPatch::default()
            })
            .await
            .unwrap();

        assert_eq!(record.appointment.date, "Friday");
        assert_eq!(record.shift.choice, ShiftChoice::Mid);
    }

    #[tokio::test]
    async fn test_patch_and_reload_propagates_write_failure() {
        let clock = FixedClock(fixed_now());
        let ctx = RecordContext::new("user-1", &clock, &FailingRecordStore);

        let result = ctx.patch_and_reload(RecordPatch::default()).await;

        match result {
            Err(DomainError::Infrastructure(_)) => {}
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_or_demo_falls_back_when_missing_or_failing() {
        let clock = FixedClock(fixed_now());
        let empty = InMemoryRecordStore::new();

        let missing = RecordContext::new("nobody", &clock, &empty).load_or_demo().await;
        let failing = RecordContext::new("user-1", &clock, &FailingRecordStore)
            .load_or_demo()
            .await;

        assert_eq!(missing, OnboardingRecord::demo());
        assert_eq!(failing, OnboardingRecord::demo());
    }

    #[tokio::test]
    async fn test_require_reports_missing_record() {
        let clock = FixedClock(fixed_now());
        let store = InMemoryRecordStore::new();

        match RecordContext::new("nobody", &clock, &store).require().await {
            Err(DomainError::RecordNotFound(id)) => assert_eq!(id, "nobody"),
            other => panic!("expected RecordNotFound, got {other:?}"),
        }
    }
}
