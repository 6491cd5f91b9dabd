//! SQLite storage layer.
//!
//! The chat log sink backed by SQLite in WAL mode.

pub mod chat_log;
pub mod pool;
