//! Relay configuration types.
//!
//! `RelayConfig` is read once at startup (optional `config.toml`, then
//! environment overrides) and is immutable afterwards. The API key is not part
//! of this struct; it is held separately as a secret by the infra layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default system prompt prepended to every conversation.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Default upstream model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default base URL of the OpenAI-compatible completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default bound on the upstream call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Process-wide relay settings. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Origins allowed by CORS. Empty (or containing `*`) means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// System prompt prepended to every conversation.
    #[serde(default = "default_system_message")]
    pub system_message: String,

    /// Model identifier sent upstream.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the completion service (without `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bound on the upstream call in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Database URL of the chat log. `None` disables persistence.
    #[serde(default)]
    pub chat_log_url: Option<String>,
}

fn default_system_message() -> String {
    DEFAULT_SYSTEM_MESSAGE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            system_message: default_system_message(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            chat_log_url: None,
        }
    }
}

impl RelayConfig {
    /// The upstream call bound as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether every origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Whether exchanges are persisted to the chat log.
    pub fn persistence_enabled(&self) -> bool {
        self.chat_log_url.is_some()
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
