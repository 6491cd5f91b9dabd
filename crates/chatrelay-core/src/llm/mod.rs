//! Completion provider abstractions.
//!
//! - `CompletionProvider`: RPITIT trait for concrete provider implementations
//! - `BoxCompletionProvider`: Object-safe wrapper for dynamic dispatch

pub mod box_provider;
pub mod provider;
