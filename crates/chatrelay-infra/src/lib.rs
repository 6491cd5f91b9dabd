//! Infrastructure layer for the chat relay.
//!
//! Contains implementations of the port traits defined in `chatrelay-core`:
//! the OpenAI-compatible completion client, the SQLite chat log, and the
//! startup configuration loader.

pub mod config;
pub mod llm;
pub mod sqlite;
