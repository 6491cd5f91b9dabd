//! Chat relay pipeline.
//!
//! ChatRelay turns one inbound [`ChatRequest`] into one upstream completion
//! call: it prepends the configured system prompt, bounds the call with a
//! per-request timeout, optionally appends the exchange to the chat log, and
//! hands back the raw completion body. A GenAI span instruments every call.

use std::time::Duration;

use serde_json::Value;
use tracing::field::Empty;
use tracing::{Instrument, Span, debug, info, info_span, warn};

use chatrelay_types::chat::{ChatLogEntry, ChatRequest, Message};
use chatrelay_types::config::RelayConfig;
use chatrelay_types::error::RelayError;
use chatrelay_types::llm::{CompletionRequest, LlmError};

use super::repository::ChatLogRepository;
use crate::llm::provider::CompletionProvider;

/// Forwards conversations to the completion service.
///
/// Generic over `CompletionProvider` and `ChatLogRepository` to keep
/// chatrelay-core free of infrastructure dependencies. Holds only read-only
/// state, so one instance serves any number of concurrent requests.
pub struct ChatRelay<P: CompletionProvider, R: ChatLogRepository> {
    provider: P,
    chat_log: Option<R>,
    system_message: String,
    model: String,
    timeout: Duration,
}

impl<P: CompletionProvider, R: ChatLogRepository> ChatRelay<P, R> {
    /// Create a relay without persistence.
    pub fn new(provider: P, config: &RelayConfig) -> Self {
        Self {
            provider,
            chat_log: None,
            system_message: config.system_message.clone(),
            model: config.model.clone(),
            timeout: config.timeout(),
        }
    }

    /// Enable persistence of completed exchanges.
    pub fn with_chat_log(mut self, chat_log: R) -> Self {
        self.chat_log = Some(chat_log);
        self
    }

    /// Access the completion provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Access the chat log, if persistence is enabled.
    pub fn chat_log(&self) -> Option<&R> {
        self.chat_log.as_ref()
    }

    /// Build the effective conversation: the system prompt followed by the
    /// caller's messages.
    ///
    /// Exactly one system message is prepended, even when the caller already
    /// sent system-role entries.
    pub fn assemble(&self, messages: Vec<Message>) -> Vec<Message> {
        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(Message::system(self.system_message.clone()));
        conversation.extend(messages);
        conversation
    }

    /// Relay one chat request and return the raw completion body.
    ///
    /// Only the upstream call is bounded by the timeout. When it elapses the
    /// in-flight call is dropped; the remote service may still finish the work.
    /// A chat log failure is logged and never fails the request.
    pub async fn relay(&self, request: ChatRequest) -> Result<Value, RelayError> {
        let completion_request = CompletionRequest {
            model: self.model.clone(),
            messages: self.assemble(request.messages),
        };

        let span = info_span!(
            "chat",
            gen_ai.operation.name = "chat",
            gen_ai.provider.name = self.provider.name(),
            gen_ai.request.model = %self.model,
            gen_ai.response.id = Empty,
        );

        self.relay_inner(completion_request).instrument(span).await
    }

    async fn relay_inner(&self, request: CompletionRequest) -> Result<Value, RelayError> {
        info!(messages = request.messages.len(), "Relaying chat request");
        debug!(conversation = ?request.messages, "Effective conversation");

        let response =
            match tokio::time::timeout(self.timeout, self.provider.complete(&request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    match &e {
                        LlmError::Api { status, kind, .. } => warn!(
                            error = %e,
                            status = *status,
                            kind = kind.as_deref().unwrap_or("unknown"),
                            "Completion service returned an error"
                        ),
                        _ => warn!(error = %e, "Completion service request failed"),
                    }
                    return Err(RelayError::Upstream(e));
                }
                Err(_) => {
                    warn!(
                        timeout_secs = self.timeout.as_secs(),
                        "Completion service timed out"
                    );
                    return Err(RelayError::UpstreamTimeout {
                        timeout: self.timeout,
                    });
                }
            };

        if let Some(id) = response.get("id").and_then(Value::as_str) {
            Span::current().record("gen_ai.response.id", id);
        }
        info!("Completion received");
        debug!(response = %response, "Completion body");

        let Some(chat_log) = &self.chat_log else {
            return Ok(response);
        };

        let entry = ChatLogEntry::new(request.messages, response);
        match chat_log.append(&entry).await {
            Ok(()) => debug!(entry_id = %entry.id, "Chat log entry appended"),
            Err(e) => warn!(
                error = %e,
                entry_id = %entry.id,
                "Failed to append chat log entry, returning completion anyway"
            ),
        }

        Ok(entry.ai_response)
    }
}
