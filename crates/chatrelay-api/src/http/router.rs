//! Axum router configuration with middleware.
//!
//! Routes: `POST /api/chat` and `GET /health`.
//! Middleware: CORS (driven by `allowed_origins`), request tracing.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatrelay_types::config::RelayConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/api/chat", post(handlers::chat::relay_chat))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy from the configured origin list.
///
/// An empty list or `*` allows any origin. Entries that are not valid header
/// values are skipped; if none survive, any origin is allowed.
pub fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("No valid CORS origins configured, allowing any origin");
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// GET /health -- liveness probe.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use secrecy::SecretString;
    use tower::ServiceExt;

    use chatrelay_core::chat::relay::ChatRelay;
    use chatrelay_core::llm::box_provider::BoxCompletionProvider;
    use chatrelay_core::llm::provider::CompletionProvider;
    use chatrelay_infra::sqlite::pool::DatabasePool;
    use chatrelay_types::llm::{CompletionRequest, LlmError};

    use crate::http::error::TIMEOUT_MESSAGE;

    enum Behavior {
        Echo,
        Fail(&'static str),
        Hang,
    }

    struct StubProvider {
        behavior: Behavior,
    }

    impl CompletionProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<Value, LlmError> {
            match self.behavior {
                Behavior::Echo => Ok(json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "choices": [{
                        "index": 0,
                        "message": { "role": "assistant", "content": "hello" },
                        "finish_reason": "stop"
                    }],
                    "seen": request.messages,
                })),
                Behavior::Fail(message) => Err(LlmError::Api {
                    status: 401,
                    kind: Some("invalid_request_error".to_string()),
                    message: message.to_string(),
                }),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(json!({}))
                }
            }
        }
    }

    fn app_with(behavior: Behavior, config: RelayConfig) -> Router {
        let provider = BoxCompletionProvider::new(StubProvider { behavior });
        let relay = ChatRelay::new(provider, &config);
        build_router(AppState::new(relay, config))
    }

    fn app(behavior: Behavior) -> Router {
        app_with(behavior, RelayConfig::default())
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_relays_completion_verbatim() {
        let response = app(Behavior::Echo)
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], "chatcmpl-1");
        assert_eq!(body["choices"][0]["message"]["content"], "hello");
        assert_eq!(
            body["seen"],
            json!([
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "hi" }
            ])
        );
    }

    #[tokio::test]
    async fn test_chat_ignores_extra_fields() {
        let response = app(Behavior::Echo)
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}],"sessionId":"abc"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_chat_missing_messages_is_bad_request() {
        let response = app(Behavior::Echo)
            .oneshot(chat_request(r#"{"conversation":[]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.contains("messages"), "got: {error}");
    }

    #[tokio::test]
    async fn test_chat_invalid_json_is_bad_request() {
        let response = app(Behavior::Echo)
            .oneshot(chat_request("not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_upstream_error_is_internal_error() {
        let response = app(Behavior::Fail("invalid_api_key"))
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "invalid_api_key" })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_timeout_is_gateway_timeout() {
        let response = app(Behavior::Hang)
            .oneshot(chat_request(
                r#"{"messages":[{"role":"user","content":"hi"}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_json(response).await, json!({ "error": TIMEOUT_MESSAGE }));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header(header::ORIGIN, "https://chat.example.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"messages":[]}"#))
            .unwrap();

        let response = app(Behavior::Echo).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_restricts_to_configured_origins() {
        let config = RelayConfig {
            allowed_origins: vec!["https://chat.example.com".to_string()],
            ..RelayConfig::default()
        };

        let preflight = |origin: &str| {
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/chat")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap()
        };

        let allowed = app_with(Behavior::Echo, config.clone())
            .oneshot(preflight("https://chat.example.com"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://chat.example.com"
        );

        let denied = app_with(Behavior::Echo, config)
            .oneshot(preflight("https://evil.example.com"))
            .await
            .unwrap();
        assert!(
            denied
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_cors_falls_back_to_any_for_invalid_origins() {
        let config = RelayConfig {
            allowed_origins: vec!["bad\norigin".to_string()],
            ..RelayConfig::default()
        };

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/chat")
            .header(header::ORIGIN, "https://chat.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app_with(Behavior::Echo, config)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_chat_log_database_records_each_exchange() {
        let upstream = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "id": "chatcmpl-db", "received": body }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, upstream).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let db_url = format!("sqlite://{}?mode=rwc", dir.path().join("chat.db").display());
        let config = RelayConfig {
            base_url: format!("http://{addr}/v1"),
            chat_log_url: Some(db_url.clone()),
            ..RelayConfig::default()
        };

        let state = AppState::init(config, SecretString::from("sk-test"))
            .await
            .unwrap();
        let app = build_router(state);

        for content in ["first", "second"] {
            let body = json!({ "messages": [{ "role": "user", "content": content }] });
            let response = app
                .clone()
                .oneshot(chat_request(&body.to_string()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["id"], "chatcmpl-db");
        }

        let pool = DatabasePool::new(&db_url).await.unwrap();
        let rows: Vec<(String, String)> =
            sqlx::query_as("SELECT user_messages, ai_response FROM chat_logs ORDER BY rowid")
                .fetch_all(&pool.writer)
                .await
                .unwrap();

        assert_eq!(rows.len(), 2);
        let messages: Value = serde_json::from_str(&rows[0].0).unwrap();
        assert_eq!(
            messages,
            json!([
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "first" }
            ])
        );
        let response: Value = serde_json::from_str(&rows[1].1).unwrap();
        assert_eq!(response["id"], "chatcmpl-db");
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Behavior::Echo)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
