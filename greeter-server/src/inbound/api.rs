use super::mapping::InvalidResponseError;

use greeter_core::InvocationError;

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Why a request body could not be read in full.
#[derive(Debug, Error)]
pub enum BodyReadError {
    #[error(transparent)]
    Stream(#[from] axum::Error),
    #[error("body not received within {0:?}")]
    TimedOut(Duration),
}

/// Failures surfaced to HTTP clients as a plain-text 500.
///
/// These bodies deliberately bypass the JSON envelope so a failure can never be mistaken for
/// a successful invocation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to read body")]
    BodyRead(#[source] BodyReadError),
    #[error("Lambda handler error: {0}")]
    Handler(#[from] InvocationError),
    #[error("Invalid response event: {0}")]
    InvalidResponse(#[from] InvalidResponseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BodyRead(cause) => tracing::error!("{self}: {cause}"),
            _ => tracing::error!("{self}"),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
