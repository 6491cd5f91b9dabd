//! Application error type mapping to HTTP status codes.
//!
//! Every failure leaves the handler as `{"error": "<message>"}` with a status
//! chosen by kind; nothing escapes as an unhandled fault.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::RelayError;

/// Message shown to callers when the completion service is too slow.
pub const TIMEOUT_MESSAGE: &str =
    "The assistant took too long to respond. Please try again in a moment.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Request body failed validation.
    Validation(String),
    /// The completion call exceeded its time budget.
    Timeout,
    /// The completion service reported a failure.
    Upstream(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::MalformedRequest(msg) => AppError::Validation(msg),
            RelayError::UpstreamTimeout { .. } => AppError::Timeout,
            RelayError::Upstream(e) => AppError::Upstream(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Timeout => (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE.to_string()),
            AppError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::llm::LlmError;
    use std::time::Duration;

    #[test]
    fn test_relay_error_mapping() {
        let validation = AppError::from(RelayError::MalformedRequest("bad".to_string()));
        assert!(matches!(validation, AppError::Validation(ref m) if m == "bad"));

        let timeout = AppError::from(RelayError::UpstreamTimeout {
            timeout: Duration::from_secs(60),
        });
        assert!(matches!(timeout, AppError::Timeout));

        let upstream = AppError::from(RelayError::Upstream(LlmError::Api {
            status: 401,
            kind: None,
            message: "invalid_api_key".to_string(),
        }));
        assert!(matches!(upstream, AppError::Upstream(ref m) if m == "invalid_api_key"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Timeout.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            AppError::Upstream("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
