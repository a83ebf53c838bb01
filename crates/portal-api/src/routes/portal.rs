//! Routes for the Navigation & Rendering context.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Json, Router, routing::get, routing::post};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use portal_core::error::DomainError;
use portal_navigation::application::dispatcher::{dispatch, perform};
use portal_navigation::domain::actions::ScreenAction;
use portal_navigation::domain::route::{Resolution, Route, resolve};
use portal_navigation::domain::screen::Screen;
use portal_progression::domain::record::OnboardingRecord;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::routes::current_record;
use crate::session::Session;
use crate::state::AppState;

/// A rendered screen.
#[derive(Debug, Serialize)]
pub struct PortalView {
    /// Whether the screen was rendered from the demonstration record.
    pub demo: bool,
    /// The screen.
    pub screen: Screen,
}

fn route_uri(route: Route) -> String {
    format!("/api/v1/portal/{route}")
}

fn render(token: Option<&str>, record: &OnboardingRecord) -> Json<PortalView> {
    Json(PortalView {
        demo: *record == OnboardingRecord::demo(),
        screen: dispatch(token, record).screen,
    })
}

/// GET /
#[instrument(skip(state, session))]
async fn show_default(session: Session, State(state): State<AppState>) -> Json<PortalView> {
    render(None, &current_record(&session, &state).await)
}

/// GET /{token}
#[instrument(skip(state, session))]
async fn show(
    session: Session,
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Response {
    if let Resolution::Redirect { from, to } = resolve(Some(&token)) {
        info!(token = %from, redirect_to = %to, "redirecting unknown navigation token");
        return Redirect::to(&route_uri(to)).into_response();
    }
    render(Some(&token), &current_record(&session, &state).await).into_response()
}

/// POST /{token}/actions
#[instrument(skip(state, session, action), fields(action = action.name()))]
async fn act(
    session: Session,
    State(state): State<AppState>,
    Path(token): Path<String>,
    JsonBody(action): JsonBody<ScreenAction>,
) -> Result<Json<PortalView>, ApiError> {
    let identity = session.require()?;
    let route = match resolve(Some(&token)) {
        Resolution::Matched(route) => route,
        Resolution::Redirect { from, .. } => {
            return Err(ApiError(DomainError::Validation(format!(
                "unknown screen: {from}"
            ))));
        }
    };
    let correlation_id = Uuid::new_v4();

    info!(correlation_id = %correlation_id, route = %route, "handling screen action");

    let screen = perform(
        route,
        &action,
        correlation_id,
        &identity.user_id,
        state.clock.as_ref(),
        state.records.as_ref(),
    )
    .await?;

    Ok(Json(PortalView {
        demo: false,
        screen,
    }))
}

/// Returns the router for the portal screens.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_default))
        .route("/{token}", get(show))
        .route("/{token}/actions", post(act))
}
