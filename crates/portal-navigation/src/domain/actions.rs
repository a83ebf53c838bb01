//! Actions a screen accepts from the user.

use portal_progression::domain::record::ShiftChoice;
use serde::Deserialize;

/// A user action posted back to the screen that offered it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScreenAction {
    /// Submit the application.
    SubmitApplication,
    /// Pick a shift without confirming it.
    SelectShift {
        /// The chosen shift.
        choice: ShiftChoice,
    },
    /// Confirm the picked shift.
    ConfirmShift,
    /// Flip a checklist step.
    ToggleStep {
        /// The step id.
        step: String,
    },
}

impl ScreenAction {
    /// The wire name of the action.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitApplication => "submit_application",
            Self::SelectShift { .. } => "select_shift",
            Self::ConfirmShift => "confirm_shift",
            Self::ToggleStep { .. } => "toggle_step",
        }
    }
}
