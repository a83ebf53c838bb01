//! Stage/step progression rules.
//!
//! These functions are pure: they operate on the most recently loaded record
//! snapshot and persist nothing. Callers re-derive after every reload.

use serde::Serialize;

use super::record::{Stage, StageMarker, Step, StepId};

/// Zero-based position of a stored stage value. Anything that is not exactly
/// one of the canonical stages counts as the earliest stage.
#[must_use]
pub fn stage_index(value: &str) -> usize {
    Stage::from_token(value).map_or(0, Stage::index)
}

/// The stage a record moves to after its step list changed: the id of the
/// first not-done step in canonical order, or `start_working` when all four
/// are done. A canonical step missing from the list counts as not done.
#[must_use]
pub fn next_stage(steps: &[Step]) -> StageMarker {
    StepId::CANONICAL
        .into_iter()
        .find(|id| !steps.iter().any(|step| step.id == id.as_str() && step.done))
        .map_or_else(|| Stage::StartWorking.into(), |id| StageMarker::new(id.as_str()))
}

/// Visual status of one stage in the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Before the current stage.
    Done,
    /// The current stage.
    Active,
    /// After the current stage.
    Upcoming,
}

/// Classifies `stage` relative to the current stage index.
#[must_use]
pub fn classify(stage: Stage, current: usize) -> StageStatus {
    match stage.index().cmp(&current) {
        std::cmp::Ordering::Less => StageStatus::Done,
        std::cmp::Ordering::Equal => StageStatus::Active,
        std::cmp::Ordering::Greater => StageStatus::Upcoming,
    }
}

/// One entry of the stage indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    /// The stage.
    pub stage: Stage,
    /// Display label.
    pub label: &'static str,
    /// Visual status.
    pub status: StageStatus,
}

/// Builds the four-entry stage indicator for a stored stage value.
#[must_use]
pub fn stage_indicator(stage: &StageMarker) -> Vec<StageProgress> {
    let current = stage_index(stage.as_str());
    Stage::ORDERED
        .into_iter()
        .map(|stage| StageProgress {
            stage,
            label: stage.label(),
            status: classify(stage, current),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps_from_mask(mask: u8) -> Vec<Step> {
        StepId::CANONICAL
            .into_iter()
            .enumerate()
            .map(|(bit, id)| Step {
                done: mask & (1 << bit) != 0,
                ..Step::canonical(id)
            })
            .collect()
    }

    #[test]
    fn test_stage_index_is_strictly_increasing_over_canonical_stages() {
        let indices: Vec<usize> = Stage::ORDERED
            .iter()
            .map(|stage| stage_index(stage.as_str()))
            .collect();

        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn test_stage_index_of_unknown_values_is_zero() {
        for value in ["", "docs", "first_day", "Onboarding", " onboarding", "start-working"] {
            assert_eq!(stage_index(value), 0, "value {value:?}");
        }
    }

    #[test]
    fn test_next_stage_is_first_open_step_for_every_combination() {
        for mask in 0u8..16 {
            // Arrange
            let steps = steps_from_mask(mask);
            let expected = StepId::CANONICAL
                .iter()
                .enumerate()
                .find(|(bit, _)| mask & (1 << bit) == 0)
                .map_or("start_working", |(_, id)| id.as_str());

            // Act
            let stage = next_stage(&steps);

            // Assert
            assert_eq!(stage.as_str(), expected, "mask {mask:04b}");
        }
    }

    #[test]
    fn test_next_stage_follows_canonical_order_not_list_order() {
        let mut steps = steps_from_mask(0b0001);
        steps.reverse();

        assert_eq!(next_stage(&steps).as_str(), "shift_selection");
    }

    #[test]
    fn test_next_stage_of_empty_list_is_application() {
        let stage = next_stage(&[]);

        assert_eq!(stage.as_str(), "application");
        assert_eq!(stage_index(stage.as_str()), 0);
    }

    #[test]
    fn test_next_stage_ignores_unknown_step_ids() {
        let steps = vec![Step {
            id: "orientation".into(),
            label: "Orientation".into(),
            done: true,
        }];

        assert_eq!(next_stage(&steps).as_str(), "application");
    }

    #[test]
    fn test_indicator_marks_done_active_upcoming() {
        let indicator = stage_indicator(&Stage::Onboarding.into());

        let statuses: Vec<StageStatus> = indicator.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            [
                StageStatus::Done,
                StageStatus::Done,
                StageStatus::Active,
                StageStatus::Upcoming
            ]
        );
    }

    #[test]
    fn test_indicator_for_non_canonical_stage_activates_first() {
        let indicator = stage_indicator(&StageMarker::new("docs"));

        assert_eq!(indicator[0].status, StageStatus::Active);
        assert!(indicator[1..].iter().all(|p| p.status == StageStatus::Upcoming));
    }
}
