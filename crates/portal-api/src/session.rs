//! Identity extractors.
//!
//! Authentication happens upstream: the proxy in front of the portal sets
//! `x-forwarded-user` and `x-forwarded-email` for signed-in users. A request
//! without a user header is a preview session.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use portal_core::error::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the opaque identity id.
pub const USER_HEADER: &str = "x-forwarded-user";
/// Header carrying the identity email.
pub const EMAIL_HEADER: &str = "x-forwarded-email";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque identity id; also the record key.
    pub user_id: String,
    /// Email reported by the identity provider. May be empty.
    pub email: String,
}

/// The caller of a portal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// A signed-in user.
    Authenticated(Identity),
    /// An anonymous visitor. Sees the demonstration record and cannot save.
    Preview,
}

impl Session {
    fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .unwrap_or_default()
                .to_owned()
        };
        let user_id = header(USER_HEADER);
        if user_id.is_empty() {
            return Self::Preview;
        }
        Self::Authenticated(Identity {
            user_id,
            email: header(EMAIL_HEADER),
        })
    }

    /// The signed-in identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` for preview sessions.
    pub fn require(self) -> Result<Identity, DomainError> {
        match self {
            Self::Authenticated(identity) => Ok(identity),
            Self::Preview => Err(DomainError::Unauthorized(
                "sign in to save your progress".into(),
            )),
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Requires a signed-in administrator. Rejects preview sessions with 401 and
/// other users with 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = Session::from_headers(&parts.headers).require()?;
        if !state.admin_emails.contains(&identity.email) {
            return Err(ApiError(DomainError::Forbidden(
                "administrator privilege required".into(),
            )));
        }
        Ok(Self(identity))
    }
}
