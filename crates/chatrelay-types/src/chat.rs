//! Inbound chat request and persisted chat log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RelayError;
pub use crate::llm::{Message, MessageRole};

/// Caller-supplied payload for `POST /api/chat`.
///
/// Only `messages` is read. Other fields sent by clients are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Decode and validate a raw request body.
    ///
    /// The body must be a JSON object with a `messages` array whose elements
    /// each carry a known `role` and a string `content`. An empty array is valid.
    pub fn from_json(body: &[u8]) -> Result<Self, RelayError> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| RelayError::MalformedRequest(format!("invalid JSON body: {e}")))?;

        if !value.is_object() {
            return Err(RelayError::MalformedRequest(
                "request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| RelayError::MalformedRequest(format!("invalid chat request: {e}")))
    }
}

/// One completed exchange, appended to the chat log when persistence is on.
///
/// `user_messages` is the effective conversation sent upstream (system prompt
/// included) and `ai_response` the raw completion body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub id: Uuid,
    pub user_messages: Vec<Message>,
    pub ai_response: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ChatLogEntry {
    /// Create an entry stamped with the current server time.
    pub fn new(user_messages: Vec<Message>, ai_response: serde_json::Value) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_messages,
            ai_response,
            timestamp: Utc::now(),
        }
    }
}
