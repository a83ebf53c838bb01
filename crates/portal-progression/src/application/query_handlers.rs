//! Query handlers for the Record & Progression context.

use portal_core::clock::Clock;
use portal_core::store::RecordStore;
use serde::Serialize;

use crate::application::context::RecordContext;
use crate::domain::progression::{StageProgress, stage_index, stage_indicator};
use crate::domain::record::OnboardingRecord;

/// A record together with its derived progression.
#[derive(Debug, Serialize)]
pub struct RecordView {
    /// Whether `record` is the demonstration record.
    pub demo: bool,
    /// Zero-based index of the stored stage.
    pub stage_index: usize,
    /// The four-entry stage indicator.
    pub stages: Vec<StageProgress>,
    /// The record itself.
    pub record: OnboardingRecord,
}

impl From<OnboardingRecord> for RecordView {
    fn from(record: OnboardingRecord) -> Self {
        Self {
            demo: record == OnboardingRecord::demo(),
            stage_index: stage_index(record.stage.as_str()),
            stages: stage_indicator(&record.stage),
            record,
        }
    }
}

/// Retrieves the record shown to `user_id`; the demonstration record stands
/// in when none can be loaded.
pub async fn get_record(
    user_id: &str,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> OnboardingRecord {
    RecordContext::new(user_id, clock, store).load_or_demo().await
}

#[cfg(test)]
mod tests {
    use portal_test_support::{FixedClock, InMemoryRecordStore, fixed_now};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_get_record_returns_stored_record() {
        let store = InMemoryRecordStore::with_document(
            "user-1",
            json!({ "employeeId": "AB12", "stage": "onboarding" }),
        );

        let record = get_record("user-1", &FixedClock(fixed_now()), &store).await;

        assert_eq!(record.employee_id, "AB12");
        let view = RecordView::from(record);
        assert!(!view.demo);
        assert_eq!(view.stage_index, 2);
        assert_eq!(view.stages.len(), 4);
    }

    #[tokio::test]
    async fn test_get_record_falls_back_to_demo() {
        let store = InMemoryRecordStore::new();

        let view = RecordView::from(get_record("user-1", &FixedClock(fixed_now()), &store).await);

        assert!(view.demo);
        assert_eq!(view.record.employee_id, "DEMO001");
        assert_eq!(view.stage_index, 1);
    }
}
