//! CompletionProvider trait definition.
//!
//! This is the core abstraction over the upstream completion service.

use chatrelay_types::llm::{CompletionRequest, LlmError};

/// Trait for completion service backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The success
/// value is the service's raw JSON body; callers relay it without reshaping.
///
/// Implementations live in chatrelay-infra (e.g., `OpenAiCompatibleProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the raw response body.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, LlmError>> + Send;
}
