//! Completion request types for the chat relay.
//!
//! These types model the data shapes exchanged with the upstream completion
//! service: role-tagged messages, the outbound request, and provider errors.
//! The upstream success body is never modelled; it is relayed as raw JSON.

use serde::{Deserialize, Serialize};

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// A system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// An assistant-role message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Outbound request to the completion service.
///
/// Serializes to the chat-completions wire shape `{ "model", "messages" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// Errors reported by a completion provider.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The service answered with an error. `message` is the service's own text.
    #[error("{message}")]
    Api {
        status: u16,
        kind: Option<String>,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
