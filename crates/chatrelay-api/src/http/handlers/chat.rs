//! Chat relay endpoint.
//!
//! POST /api/chat
//!
//! Body: `{ "messages": [ { "role": "user", "content": "..." }, ... ] }`.
//! On success the completion service's JSON is returned unchanged.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use chatrelay_types::chat::ChatRequest;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat -- relay one conversation to the completion service.
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that malformed input gets the same `{"error": ...}` shape as other failures.
pub async fn relay_chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request = ChatRequest::from_json(&body)?;
    let response = state.relay.relay(request).await?;
    Ok(Json(response))
}
