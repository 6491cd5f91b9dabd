//! OpenAiCompatibleProvider -- concrete [`CompletionProvider`] for any service
//! speaking the OpenAI chat completions protocol.
//!
//! Sends `{ model, messages }` to `{base_url}/chat/completions` with bearer
//! authentication and returns the response body as raw JSON. Error bodies of
//! the form `{"error": {"message": ..., "type": ..., "code": ...}}` are mapped
//! to [`LlmError::Api`] carrying the service's own message.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use chatrelay_core::llm::provider::CompletionProvider;
use chatrelay_types::llm::{CompletionRequest, LlmError};

/// OpenAI-compatible completion provider.
///
/// The client has a connect timeout only. The overall bound on a completion
/// call is enforced by the relay, per request.
pub struct OpenAiCompatibleProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiCompatibleProvider {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a new provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Bearer token wrapped in SecretString
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    pub fn new(api_key: SecretString, base_url: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the chat completions endpoint.
    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// OpenAiCompatibleProvider intentionally does NOT derive Debug so the
// SecretString can never end up in a formatted struct dump.

impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(map_error_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))
    }
}

/// Map a non-2xx response body to an [`LlmError::Api`].
///
/// Prefers `error.message` from a JSON error object, then a bare string
/// `error`, then falls back to `HTTP {status}: {body}`.
fn map_error_body(status: u16, body: &str) -> LlmError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let message = error
        .and_then(|e| e.get("message").and_then(Value::as_str).or_else(|| e.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}: {body}"));

    let kind = error
        .and_then(|e| {
            e.get("code")
                .and_then(Value::as_str)
                .or_else(|| e.get("type").and_then(Value::as_str))
        })
        .map(str::to_string);

    LlmError::Api {
        status,
        kind,
        message,
    }
}
