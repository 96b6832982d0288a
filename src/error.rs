//! # Error Handling
//!
//! This module defines the application error type and how it is converted to HTTP responses.
//!
//! ## Error Taxonomy:
//! - **InvalidInput**: bad start parameters, empty answer, missing TTS text (400)
//! - **InvalidState**: operation out of sequence, e.g. answering without a pending question (400)
//! - **NotStarted**: session-dependent operation before `/api/start` (400)
//! - **NoData**: result requested with no recorded answers (400)
//! - **Upstream**: the completion or speech collaborator failed (500)
//! - **Internal**: server-side problems (500)
//!
//! Malformed model output is not an `AppError`: it is recovered locally with a
//! fallback value (see `interview::parse`).
//!
//! ## Client-visible messages:
//! Upstream failures carry only a generic message. The detailed cause is logged
//! where the failure happens and never forwarded to the client.

use crate::interview::session::SessionError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Custom error types for the application.
///
/// ## Usage Example:
/// ```rust,ignore
/// return Err(AppError::InvalidInput("Answer must not be empty".to_string()));
/// ```
#[derive(Debug)]
pub enum AppError {
    /// Client sent invalid or malformed data
    InvalidInput(String),

    /// Operation is not valid in the session's current state
    InvalidState(String),

    /// No interview session is associated with the request
    NotStarted,

    /// The interview has no recorded answers to evaluate
    NoData,

    /// The completion or speech collaborator failed; holds a client-safe message
    Upstream(String),

    /// Internal server errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            AppError::NotStarted => write!(f, "Interview not started"),
            AppError::NoData => write!(f, "No interview data"),
            AppError::Upstream(msg) => write!(f, "Upstream failure: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Machine-readable error type used in the JSON body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::InvalidState(_) => "invalid_state",
            AppError::NotStarted => "not_started",
            AppError::NoData => "no_data",
            AppError::Upstream(_) => "upstream_failure",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::InvalidState(msg) | AppError::Upstream(msg) => {
                msg.clone()
            }
            AppError::NotStarted => "Interview not started".to_string(),
            AppError::NoData => "No interview data".to_string(),
            // Internal details stay in the logs
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// Converts errors into HTTP responses.
///
/// ## JSON Response Format:
/// ```json
/// {
///   "error": {
///     "type": "not_started",
///     "message": "Interview not started",
///     "timestamp": "2025-01-01T12:00:00Z"
///   }
/// }
/// ```
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::InvalidState(_)
            | AppError::NotStarted
            | AppError::NoData => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error_type = self.kind(), "{}", self);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": {
                "type": self.kind(),
                "message": self.client_message(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        }))
    }
}

/// Automatic conversion from anyhow::Error to AppError.
///
/// When you use `?` with an anyhow::Error, it becomes an AppError::Internal.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Session rule violations are the caller's fault.
impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoPendingQuestion => AppError::InvalidState(err.to_string()),
            SessionError::InvalidDuration(_)
            | SessionError::InvalidProfile(_)
            | SessionError::EmptyAnswer => AppError::InvalidInput(err.to_string()),
        }
    }
}

/// Type alias for Results that use our custom error type.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotStarted.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidState("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Upstream("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_session_errors_map_to_taxonomy() {
        assert!(matches!(
            AppError::from(SessionError::NoPendingQuestion),
            AppError::InvalidState(_)
        ));
        assert!(matches!(
            AppError::from(SessionError::EmptyAnswer),
            AppError::InvalidInput(_)
        ));
    }

    #[actix_web::test]
    async fn test_internal_details_not_exposed() {
        let response = AppError::Internal("lock poisoned at store.rs:42".into()).error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["type"], "internal_error");
        assert_eq!(value["error"]["message"], "Internal server error");
    }
}
