//! Request body extractor.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` whose rejections are reported as `validation_error`
/// responses instead of axum's plain-text bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
