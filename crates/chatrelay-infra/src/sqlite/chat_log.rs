//! SQLite chat log implementation.
//!
//! Implements `ChatLogRepository` from `chatrelay-core`. Entries are
//! insert-only; the conversation and the completion body are stored as JSON text.

use chatrelay_core::chat::repository::ChatLogRepository;
use chatrelay_types::chat::ChatLogEntry;
use chatrelay_types::error::RepositoryError;
use chrono::{DateTime, Utc};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatLogRepository`.
pub struct SqliteChatLogRepository {
    pool: DatabasePool,
}

impl SqliteChatLogRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

impl ChatLogRepository for SqliteChatLogRepository {
    async fn append(&self, entry: &ChatLogEntry) -> Result<(), RepositoryError> {
        let user_messages = serde_json::to_string(&entry.user_messages)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let ai_response = serde_json::to_string(&entry.ai_response)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO chat_logs (id, user_messages, ai_response, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(entry.id.to_string())
        .bind(user_messages)
        .bind(ai_response)
        .bind(format_datetime(&entry.timestamp))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}
