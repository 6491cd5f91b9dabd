//! Observability setup for the chat relay: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
