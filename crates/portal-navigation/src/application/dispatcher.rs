//! Token dispatch and screen actions.

use portal_core::clock::Clock;
use portal_core::error::DomainError;
use portal_core::store::RecordStore;
use portal_progression::application::command_handlers::{
    handle_confirm_shift, handle_select_shift, handle_submit_application, handle_toggle_step,
};
use portal_progression::domain::commands::{
    ConfirmShift, SelectShift, SubmitApplication, ToggleStep,
};
use portal_progression::domain::record::{OnboardingRecord, StepId};
use tracing::debug;
use uuid::Uuid;

use crate::application::screens::render;
use crate::domain::actions::ScreenAction;
use crate::domain::route::{Resolution, Route, resolve};
use crate::domain::screen::Screen;

/// The result of dispatching a navigation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// How the token resolved.
    pub resolution: Resolution,
    /// The screen rendered for the resolved route.
    pub screen: Screen,
}

/// Resolves `token` and renders the resulting screen from `record`.
///
/// Every token yields a screen: unknown tokens render the default screen and
/// report the redirect in [`Dispatch::resolution`].
#[must_use]
pub fn dispatch(token: Option<&str>, record: &OnboardingRecord) -> Dispatch {
    let resolution = resolve(token);
    if let Resolution::Redirect { from, to } = &resolution {
        debug!(token = %from, redirect_to = %to, "unknown navigation token");
    }
    let screen = render(resolution.route(), record);
    Dispatch { resolution, screen }
}

/// Whether `route` offers `action`.
#[must_use]
pub fn accepts(route: Route, action: &ScreenAction) -> bool {
    match action {
        ScreenAction::SubmitApplication => route == Route::Application,
        ScreenAction::SelectShift { .. } | ScreenAction::ConfirmShift => route == Route::Shift,
        ScreenAction::ToggleStep { step } => matches!(
            (route, StepId::from_token(step)),
            (Route::Docs, Some(StepId::Docs)) | (Route::FirstDay, Some(StepId::FirstDay))
        ),
    }
}

/// Applies `action` on `route` for `user_id`, then renders the same route
/// from the record as re-read after the write.
///
/// An action whose slot renders disabled for the current record writes
/// nothing and re-renders the current record.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the route does not offer the action
/// or no shift was chosen, `DomainError::RecordNotFound` if the user has no
/// record, or any store error.
pub async fn perform(
    route: Route,
    action: &ScreenAction,
    correlation_id: Uuid,
    user_id: &str,
    clock: &dyn Clock,
    store: &dyn RecordStore,
) -> Result<Screen, DomainError> {
    if !accepts(route, action) {
        return Err(DomainError::Validation(format!(
            "screen {route} does not accept {}",
            action.name()
        )));
    }
    let user_id = user_id.to_owned();

    let result = match action {
        ScreenAction::SubmitApplication => {
            let command = SubmitApplication {
                correlation_id,
                user_id,
            };
            handle_submit_application(&command, clock, store).await?
        }
        ScreenAction::SelectShift { choice } => {
            let command = SelectShift {
                correlation_id,
                user_id,
                choice: *choice,
            };
            handle_select_shift(&command, clock, store).await?
        }
        ScreenAction::ConfirmShift => {
            let command = ConfirmShift {
                correlation_id,
                user_id,
            };
            handle_confirm_shift(&command, clock, store).await?
        }
        ScreenAction::ToggleStep { step } => {
            let step = StepId::from_token(step)
                .ok_or_else(|| DomainError::Validation(format!("unknown step: {step}")))?;
            let command = ToggleStep {
                correlation_id,
                user_id,
                step,
            };
            handle_toggle_step(&command, clock, store).await?
        }
    };

    Ok(render(route, &result.record))
}

#[cfg(test)]
mod tests {
    use portal_progression::domain::record::{ShiftChoice, Stage};
    use portal_progression::domain::seed::starter_record;
    use portal_test_support::{FailingRecordStore, FixedClock, InMemoryRecordStore, fixed_now};

    use super::*;
    use crate::domain::screen::Block;

    fn registered_store() -> InMemoryRecordStore {
        let record = starter_record("AB12", "new.starter@example.com");
        InMemoryRecordStore::with_document("user-1", serde_json::to_value(record).unwrap())
    }

    fn stored(store: &InMemoryRecordStore) -> OnboardingRecord {
        OnboardingRecord::from_document(store.document("user-1").unwrap()).unwrap()
    }

    #[test]
    fn test_dispatch_renders_every_route() {
        let record = OnboardingRecord::demo();

        for route in Route::ALL {
            let dispatched = dispatch(Some(route.token()), &record);

            assert_eq!(dispatched.resolution, Resolution::Matched(route));
            assert_eq!(dispatched.screen.route, route);
        }
    }

    #[test]
    fn test_dispatch_unknown_token_renders_default_with_redirect() {
        let dispatched = dispatch(Some("payroll"), &OnboardingRecord::demo());

        assert!(matches!(dispatched.resolution, Resolution::Redirect { .. }));
        assert_eq!(dispatched.screen.route, Route::Progress);
    }

    #[test]
    fn test_accepts_only_the_actions_a_screen_offers() {
        let docs = ScreenAction::ToggleStep {
            step: "docs".into(),
        };

        assert!(accepts(Route::Docs, &docs));
        assert!(!accepts(Route::FirstDay, &docs));
        assert!(!accepts(Route::Progress, &ScreenAction::SubmitApplication));
        assert!(accepts(Route::Shift, &ScreenAction::ConfirmShift));
        assert!(!accepts(
            Route::Docs,
            &ScreenAction::ToggleStep {
                step: "application".into()
            }
        ));
    }

    #[tokio::test]
    async fn test_perform_rejects_action_not_offered_without_writing() {
        // Arrange
        let store = registered_store();
        let clock = FixedClock(fixed_now());

        // Act
        let result = perform(
            Route::Help,
            &ScreenAction::SubmitApplication,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.patches().is_empty());
    }

    #[tokio::test]
    async fn test_perform_submit_application_rerenders_from_reloaded_record() {
        // Arrange
        let store = registered_store();
        let clock = FixedClock(fixed_now());

        // Act
        let screen = perform(
            Route::Application,
            &ScreenAction::SubmitApplication,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(screen.route, Route::Application);
        assert!(!screen.action("submit_application", None).unwrap().enabled);
        assert_eq!(stored(&store).stage.as_str(), "shift_selection");
    }

    #[tokio::test]
    async fn test_perform_select_then_confirm_shift() {
        let store = registered_store();
        let clock = FixedClock(fixed_now());

        let selected = perform(
            Route::Shift,
            &ScreenAction::SelectShift {
                choice: ShiftChoice::Early,
            },
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await
        .unwrap();
        assert!(selected.action("confirm_shift", None).unwrap().enabled);

        let confirmed = perform(
            Route::Shift,
            &ScreenAction::ConfirmShift,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await
        .unwrap();

        assert!(!confirmed.action("confirm_shift", None).unwrap().enabled);
        assert!(matches!(
            confirmed.body[0],
            Block::ShiftOptions {
                confirmed: true,
                ..
            }
        ));
        let record = stored(&store);
        assert_eq!(record.stage.as_str(), "onboarding");
        assert!(record.shift.confirmed);
    }

    #[tokio::test]
    async fn test_perform_disabled_actions_on_finished_record_write_nothing() {
        // Arrange
        let mut record = starter_record("AB12", "new.starter@example.com");
        for step in StepId::CANONICAL {
            record.steps = record.steps_with(step, true);
        }
        record.stage = Stage::StartWorking.into();
        record.shift.choice = ShiftChoice::Mid;
        record.shift.confirmed = true;
        let store =
            InMemoryRecordStore::with_document("user-1", serde_json::to_value(&record).unwrap());
        let clock = FixedClock(fixed_now());
        assert!(!render(Route::Shift, &record).action("confirm_shift", None).unwrap().enabled);
        assert!(
            !render(Route::Application, &record)
                .action("submit_application", None)
                .unwrap()
                .enabled
        );

        // Act
        let shift = perform(
            Route::Shift,
            &ScreenAction::ConfirmShift,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await
        .unwrap();
        let application = perform(
            Route::Application,
            &ScreenAction::SubmitApplication,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(shift.route, Route::Shift);
        assert_eq!(application.route, Route::Application);
        assert!(store.patches().is_empty());
        assert_eq!(stored(&store).stage.as_str(), "start_working");
    }

    #[tokio::test]
    async fn test_perform_toggle_step_twice_restores_step() {
        let store = registered_store();
        let clock = FixedClock(fixed_now());
        let action = ScreenAction::ToggleStep {
            step: "docs".into(),
        };

        perform(Route::Docs, &action, Uuid::new_v4(), "user-1", &clock, &store)
            .await
            .unwrap();
        assert!(stored(&store).is_step_done(StepId::Docs));

        perform(Route::Docs, &action, Uuid::new_v4(), "user-1", &clock, &store)
            .await
            .unwrap();
        assert!(!stored(&store).is_step_done(StepId::Docs));
        assert_eq!(store.patches().len(), 2);
    }

    #[tokio::test]
    async fn test_perform_propagates_store_failure() {
        let clock = FixedClock(fixed_now());

        let result = perform(
            Route::Application,
            &ScreenAction::SubmitApplication,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &FailingRecordStore,
        )
        .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_perform_without_record_is_not_found() {
        let store = InMemoryRecordStore::new();
        let clock = FixedClock(fixed_now());

        let result = perform(
            Route::Shift,
            &ScreenAction::ConfirmShift,
            Uuid::new_v4(),
            "user-1",
            &clock,
            &store,
        )
        .await;

        assert!(matches!(result, Err(DomainError::RecordNotFound(_))));
    }
}
