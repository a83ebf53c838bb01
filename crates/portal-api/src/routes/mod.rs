//! Route modules organized by bounded context.

pub mod admin;
pub mod health;
pub mod portal;
pub mod record;
pub mod registration;
pub mod session;

use portal_progression::application::query_handlers::get_record;
use portal_progression::domain::record::OnboardingRecord;

use crate::session::Session;
use crate::state::AppState;

/// The record a session sees: its own for signed-in users, the
/// demonstration record for previews and whenever loading fails.
pub(crate) async fn current_record(session: &Session, state: &AppState) -> OnboardingRecord {
    match session {
        Session::Authenticated(identity) => {
            get_record(
                &identity.user_id,
                state.clock.as_ref(),
                state.records.as_ref(),
            )
            .await
        }
        Session::Preview => OnboardingRecord::demo(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use portal_core::store::{AllowListStore, RecordStore};
    use portal_test_support::{FixedClock, InMemoryAllowListStore, fixed_now};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::AdminEmails;
    use crate::session::{EMAIL_HEADER, USER_HEADER};
    use crate::state::AppState;

    pub const ADMIN_EMAIL: &str = "ops@example.com";

    pub fn state_with(
        records: Arc<dyn RecordStore>,
        allow_list: Arc<dyn AllowListStore>,
    ) -> AppState {
        AppState::new(
            Arc::new(FixedClock(fixed_now())),
            records,
            allow_list,
            AdminEmails::parse(ADMIN_EMAIL),
        )
    }

    pub fn state_with_records(records: Arc<dyn RecordStore>) -> AppState {
        state_with(records, Arc::new(InMemoryAllowListStore::new()))
    }

    pub fn request(
        method: &str,
        uri: &str,
        user: Option<(&str, &str)>,
        body: Option<&Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((user_id, email)) = user {
            builder = builder
                .header(USER_HEADER, user_id)
                .header(EMAIL_HEADER, email);
        }
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }
}
