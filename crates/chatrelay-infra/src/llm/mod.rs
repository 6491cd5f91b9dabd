//! Completion provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`CompletionProvider`]
//! trait defined in `chatrelay-core`, and a factory ([`create_provider`]) that
//! builds a type-erased provider from the relay configuration.
//!
//! [`CompletionProvider`]: chatrelay_core::llm::provider::CompletionProvider

pub mod openai_compat;

use secrecy::SecretString;

use chatrelay_core::llm::box_provider::BoxCompletionProvider;
use chatrelay_types::config::RelayConfig;
use chatrelay_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxCompletionProvider`] for the configured base URL.
///
/// # Errors
///
/// Returns an error if the underlying HTTP client cannot be constructed.
pub fn create_provider(
    config: &RelayConfig,
    api_key: SecretString,
) -> Result<BoxCompletionProvider, LlmError> {
    let provider = OpenAiCompatibleProvider::new(api_key, &config.base_url)?;
    Ok(BoxCompletionProvider::new(provider))
}
