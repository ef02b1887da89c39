//! Error types for the HTTP surface.
//!
//! Client-facing bodies are fixed strings. Details stay in the logs.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rust_common::PlatformError;
use serde_json::json;
use ssf_caep::CaepError;
use thiserror::Error;

/// Errors raised while handling a request or running the server.
#[derive(Debug, Error)]
pub enum ReceiverError {
    /// Body was not JSON or not a well-formed SET.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Body exceeded the configured limit.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Server-side failure.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl ReceiverError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEvent(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Platform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic message returned to the caller.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidEvent(_) => "Invalid event format",
            Self::PayloadTooLarge => "Payload too large",
            Self::Platform(_) => "Internal server error",
        }
    }
}

impl From<CaepError> for ReceiverError {
    fn from(err: CaepError) -> Self {
        Self::InvalidEvent(err.to_string())
    }
}

impl From<JsonRejection> for ReceiverError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge
        } else {
            Self::InvalidEvent(rejection.body_text())
        }
    }
}

impl From<std::io::Error> for ReceiverError {
    fn from(err: std::io::Error) -> Self {
        Self::Platform(err.into())
    }
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.public_message() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ReceiverError::InvalidEvent("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReceiverError::PayloadTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ReceiverError::Platform(PlatformError::internal("x")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_caep_error_maps_to_invalid_event() {
        let err: ReceiverError = CaepError::malformed("missing claim: jti").into();
        assert!(matches!(err, ReceiverError::InvalidEvent(_)));
        assert_eq!(err.public_message(), "Invalid event format");
    }

    #[test]
    fn test_responses_do_not_leak_details() {
        let err = ReceiverError::InvalidEvent("missing claim: secret-internal-detail".into());
        assert!(!err.public_message().contains("secret"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = ReceiverError::Platform(PlatformError::internal("db path /var/x"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
