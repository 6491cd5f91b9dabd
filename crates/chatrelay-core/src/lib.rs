//! Relay pipeline and port traits for the chat relay.
//!
//! This crate defines the "ports" (provider and repository traits) that the
//! infrastructure layer implements, plus the [`chat::relay::ChatRelay`]
//! service. It depends only on `chatrelay-types` -- never on
//! `chatrelay-infra` or any database/HTTP crate.

pub mod chat;
pub mod llm;
