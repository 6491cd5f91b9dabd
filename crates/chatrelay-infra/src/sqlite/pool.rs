//! Database pool for the chat log in WAL mode.
//!
//! The relay only ever inserts, so a single-connection writer pool is enough.
//! SQLite allows one writer at a time; the pool serializes concurrent appends.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Single-connection writer pool for SQLite with WAL mode.
#[derive(Clone)]
pub struct DatabasePool {
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the database and run migrations.
    ///
    /// Uses WAL journal mode and a 5-second busy timeout. The file is created
    /// if missing.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        Ok(Self { writer })
    }
}
