//! Shared domain types for the chat relay.
//!
//! Conversation messages, the inbound chat request, the persisted chat log
//! entry, relay configuration, and the error enums shared by every crate.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
