//! Application state shared by every request.
//!
//! The relay is generic over provider/repository traits; AppState pins it to
//! the concrete infra implementations. Everything here is read-only after
//! startup.

use std::sync::Arc;

use secrecy::SecretString;

use chatrelay_core::chat::relay::ChatRelay;
use chatrelay_core::llm::box_provider::BoxCompletionProvider;
use chatrelay_infra::llm::create_provider;
use chatrelay_infra::sqlite::chat_log::SqliteChatLogRepository;
use chatrelay_infra::sqlite::pool::DatabasePool;
use chatrelay_types::config::RelayConfig;

/// Concrete type alias for the relay pinned to infra implementations.
pub type ConcreteChatRelay = ChatRelay<BoxCompletionProvider, SqliteChatLogRepository>;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConcreteChatRelay>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    /// Wire the provider and, when configured, the chat log database.
    pub async fn init(config: RelayConfig, api_key: SecretString) -> anyhow::Result<Self> {
        let provider = create_provider(&config, api_key)?;
        let mut relay = ChatRelay::new(provider, &config);

        if let Some(url) = &config.chat_log_url {
            let pool = DatabasePool::new(url).await?;
            relay = relay.with_chat_log(SqliteChatLogRepository::new(pool));
        }

        Ok(Self::new(relay, config))
    }

    pub fn new(relay: ConcreteChatRelay, config: RelayConfig) -> Self {
        Self {
            relay: Arc::new(relay),
            config: Arc::new(config),
        }
    }
}
