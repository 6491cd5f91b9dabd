//! ChatLogRepository trait definition.

use chatrelay_types::chat::ChatLogEntry;
use chatrelay_types::error::RepositoryError;

/// Append-only sink for completed exchanges.
///
/// Implementations live in chatrelay-infra (e.g., `SqliteChatLogRepository`).
/// The relay never reads, updates, or deletes entries.
pub trait ChatLogRepository: Send + Sync {
    /// Append one entry.
    fn append(
        &self,
        entry: &ChatLogEntry,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
