use std::time::Duration;

use thiserror::Error;

use crate::llm::LlmError;

/// Errors produced while relaying one chat request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("completion service did not respond within {}s", .timeout.as_secs())]
    UpstreamTimeout { timeout: Duration },

    #[error(transparent)]
    Upstream(#[from] LlmError),
}

/// Errors from repository operations (used by trait definitions in chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while loading configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing required setting: {0}")]
    Missing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_is_transparent() {
        let err = RelayError::from(LlmError::Api {
            status: 500,
            kind: None,
            message: "server exploded".to_string(),
        });
        assert_eq!(err.to_string(), "server exploded");
    }

    #[test]
    fn test_timeout_display() {
        let err = RelayError::UpstreamTimeout {
            timeout: Duration::from_secs(60),
        };
        assert_eq!(err.to_string(), "completion service did not respond within 60s");
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "REQUEST_TIMEOUT_SECS".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }
}
