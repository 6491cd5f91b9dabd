//! HTTP API layer.
//!
//! Axum-based API exposing `POST /api/chat` and `GET /health`, with CORS
//! and request tracing.

pub mod error;
pub mod handlers;
pub mod router;
