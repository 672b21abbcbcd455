//! # error
//!
//! Centralised application error type.
//!
//! Every command handler returns `Result<_, AppError>`.  The `Display` text of
//! each variant is exactly what the dashboard shows to the user, and axum's
//! `IntoResponse` impl wraps it in a structured JSON body so the page always
//! gets a machine-readable response even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown whenever `/subscribe` fails.  Transport detail stays in the log.
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Failed to subscribe. Please try again later.";

/// Message forced into the error panel when the browser reports going offline.
pub const OFFLINE_MESSAGE: &str =
    "You appear to be offline. Please check your internet connection.";

// ─── Validation ───────────────────────────────────────────────────────────────

/// Local form-validation failures.  Never sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    EmptyEmail,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Invalid custom strategy: {0}")]
    InvalidCustomParams(String),

    /// Body could not be read as a subscribe form at all.
    #[error("Please check the subscription form and try again")]
    MalformedForm,
}

// ─── AppError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    /// Snapshot endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Snapshot endpoint unreachable (DNS, TLS, connection reset ...).
    #[error("{0}")]
    Transport(String),

    /// Snapshot body was not JSON.
    #[error("{0}")]
    Decode(String),

    /// Payload decoded but could not be turned into UI state.
    #[error("Error displaying data: {0}")]
    Presentation(String),

    /// Subscribe form rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `/subscribe` failed.  Deliberately hides status code and transport detail.
    #[error("{}", SUBSCRIBE_FAILED_MESSAGE)]
    Submission,

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Status { .. }
            | AppError::Transport(_)
            | AppError::Decode(_)
            | AppError::Presentation(_)
            | AppError::Submission => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "ok":    false,
            "error": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_format() {
        let err = AppError::Status { status: 500, reason: "Internal Server Error".into() };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_presentation_prefix() {
        let err = AppError::Presentation("missing field `price`".into());
        assert_eq!(err.to_string(), "Error displaying data: missing field `price`");
    }

    #[test]
    fn test_submission_hides_detail() {
        assert_eq!(AppError::Submission.to_string(), SUBSCRIBE_FAILED_MESSAGE);
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err: AppError = ValidationError::EmptyEmail.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Please enter your email address");
    }
}
