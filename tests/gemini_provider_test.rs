// ABOUTME: Integration tests for the Gemini provider against a local mock HTTP server
// ABOUTME: Covers request shape, header authentication, status mapping and envelope failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use common::{init_test_logging, recipe_text, sample_inventory};
use nutrimind::config::LlmConfig;
use nutrimind::errors::{AppError, ErrorCode, GenerationError};
use nutrimind::generation::schemas::recipe_schema;
use nutrimind::generation::StructuredGenerationClient;
use nutrimind::kitchen::{KitchenService, KitchenState, KitchenStore};
use nutrimind::llm::schema::ResponseSchema;
use nutrimind::llm::{GeminiProvider, GenerationRequest, LlmProvider};
use nutrimind::models::UserPreferences;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const API_KEY: &str = "test-key-123";

/// What the mock server saw for one request
#[derive(Debug, Clone)]
struct Captured {
    model_method: String,
    api_key: Option<String>,
    query: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    delay: Duration,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn generate_handler(
    State(state): State<MockState>,
    Path(model_method): Path<String>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.captured.lock().unwrap().push(Captured {
        model_method,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
        query: uri.query().map(str::to_owned),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

async fn list_models_handler(headers: HeaderMap) -> StatusCode {
    match headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) {
        Some(API_KEY) => StatusCode::OK,
        _ => StatusCode::FORBIDDEN,
    }
}

struct MockServer {
    base_url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockServer {
    async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        Self::start_delayed(status, body, Duration::ZERO).await
    }

    async fn start_delayed(status: StatusCode, body: impl Into<String>, delay: Duration) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body: body.into(),
            delay,
            captured: Arc::clone(&captured),
        };
        let app = Router::new()
            .route("/v1beta/models", get(list_models_handler))
            .route("/v1beta/models/:model_method", post(generate_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/v1beta"),
            captured,
        }
    }

    fn provider(&self) -> GeminiProvider {
        GeminiProvider::new(API_KEY)
            .with_base_url(format!("{}/", self.base_url))
            .with_default_model("gemini-test")
    }

    fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

fn candidate_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 80, "totalTokenCount": 200}
    })
    .to_string()
}

fn simple_request() -> GenerationRequest {
    GenerationRequest::new(
        "Say hello",
        ResponseSchema::object().required("greeting", ResponseSchema::string()),
    )
}

// ============================================================================
// Successful Calls
// ============================================================================

#[tokio::test]
async fn test_generate_sends_key_in_header_and_schema_in_body() {
    init_test_logging();
    let server = MockServer::start(StatusCode::OK, candidate_body("{\"greeting\":\"hi\"}")).await;
    let provider = server.provider();

    let request = simple_request().with_temperature(0.2).with_max_tokens(256);
    provider.generate(&request).await.unwrap();

    let captured = server.captured();
    assert_eq!(captured.len(), 1);
    let call = &captured[0];
    assert_eq!(call.model_method, "gemini-test:generateContent");
    assert_eq!(call.api_key.as_deref(), Some(API_KEY));
    assert_eq!(call.query, None);

    let body = &call.body;
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Say hello");
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(config["responseSchema"]["required"], json!(["greeting"]));
    assert_eq!(config["maxOutputTokens"], 256);
    assert_eq!(config["candidateCount"], 1);
    assert!((config["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
}

#[tokio::test]
async fn test_generate_returns_text_usage_and_finish_reason() {
    let server = MockServer::start(StatusCode::OK, candidate_body("{\"greeting\":\"hi\"}")).await;

    let response = server.provider().generate(&simple_request()).await.unwrap();

    assert_eq!(response.text.as_deref(), Some("{\"greeting\":\"hi\"}"));
    assert_eq!(response.model, "gemini-test");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 120);
    assert_eq!(usage.completion_tokens, 80);
    assert_eq!(usage.total_tokens, 200);
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let server = MockServer::start(StatusCode::OK, candidate_body("{}")).await;

    let request = simple_request().with_model("gemini-other");
    let response = server.provider().generate(&request).await.unwrap();

    assert_eq!(response.model, "gemini-other");
    assert_eq!(server.captured()[0].model_method, "gemini-other:generateContent");
}

#[tokio::test]
async fn test_split_text_parts_are_concatenated() {
    let body = json!({
        "candidates": [{
            "content": {"parts": [{"text": "{\"greeting\":"}, {"text": "\"hi\"}"}]}
        }]
    });
    let server = MockServer::start(StatusCode::OK, body.to_string()).await;

    let response = server.provider().generate(&simple_request()).await.unwrap();
    assert_eq!(response.text.as_deref(), Some("{\"greeting\":\"hi\"}"));
    assert!(response.usage.is_none());
}

#[tokio::test]
async fn test_empty_candidates_give_absent_text() {
    let server = MockServer::start(StatusCode::OK, json!({"candidates": []}).to_string()).await;

    let response = server.provider().generate(&simple_request()).await.unwrap();
    assert_eq!(response.text, None);
}

#[tokio::test]
async fn test_end_to_end_recipe_through_gemini() {
    let server = MockServer::start(StatusCode::OK, candidate_body(&recipe_text("Gemini Eggs"))).await;
    let client = StructuredGenerationClient::new(Arc::new(server.provider()));

    let recipe = client
        .generate_recipe(&sample_inventory(), &[], &UserPreferences::default())
        .await
        .unwrap();
    assert_eq!(recipe.title, "Gemini Eggs");

    let sent_schema = &server.captured()[0].body["generationConfig"]["responseSchema"];
    assert_eq!(sent_schema, &serde_json::to_value(recipe_schema()).unwrap());
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_rate_limit_reports_rounded_retry_delay() {
    let body = json!({
        "error": {
            "code": 429,
            "message": "Quota exceeded for metric generate_content_free_tier_requests. Please retry in 3.2s.",
            "status": "RESOURCE_EXHAUSTED"
        }
    });
    let server = MockServer::start(StatusCode::TOO_MANY_REQUESTS, body.to_string()).await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();

    match &error {
        GenerationError::Unavailable { reason, status } => {
            assert_eq!(*status, Some(429));
            assert_eq!(
                reason,
                "AI service quota exceeded. Please try again in 4 seconds."
            );
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalRateLimited);
}

#[tokio::test]
async fn test_server_error_is_unavailable_with_status() {
    let body = json!({"error": {"code": 500, "message": "Internal error encountered."}});
    let server = MockServer::start(StatusCode::INTERNAL_SERVER_ERROR, body.to_string()).await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();

    match error {
        GenerationError::Unavailable { reason, status } => {
            assert_eq!(status, Some(500));
            assert!(reason.contains("Internal error encountered."), "reason: {reason}");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_key_maps_to_auth_failure() {
    let body = json!({"error": {"code": 403, "message": "API key not valid."}});
    let server = MockServer::start(StatusCode::FORBIDDEN, body.to_string()).await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();
    assert!(error.is_unavailable());
    assert_eq!(AppError::from(error).code, ErrorCode::ExternalAuthFailed);
}

#[tokio::test]
async fn test_non_json_error_body_is_previewed() {
    let server = MockServer::start(StatusCode::BAD_GATEWAY, "upstream connect error").await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();
    assert!(error.to_string().contains("upstream connect error"));
}

#[tokio::test]
async fn test_unparseable_success_body_is_malformed() {
    let server = MockServer::start(StatusCode::OK, "<html>gateway</html>").await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();
    assert!(error.is_malformed(), "unexpected error: {error:?}");
}

#[tokio::test]
async fn test_blocked_prompt_is_unavailable() {
    let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
    let server = MockServer::start(StatusCode::OK, body.to_string()).await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();
    assert!(error.is_unavailable());
    assert!(error.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_safety_filtered_candidate_is_unavailable() {
    let body = json!({"candidates": [{"finishReason": "SAFETY"}]});
    let server = MockServer::start(StatusCode::OK, body.to_string()).await;

    let error = server.provider().generate(&simple_request()).await.unwrap_err();
    assert!(error.is_unavailable(), "unexpected error: {error:?}");
    assert!(error.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_textless_stop_candidate_gives_absent_text() {
    let body = json!({"candidates": [{"content": {"parts": []}, "finishReason": "STOP"}]});
    let server = MockServer::start(StatusCode::OK, body.to_string()).await;

    let response = server.provider().generate(&simple_request()).await.unwrap();
    assert_eq!(response.text, None);
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
}

#[tokio::test]
async fn test_filtered_meal_estimate_logs_nothing() {
    let body = json!({"candidates": [{"finishReason": "RECITATION"}]});
    let server = MockServer::start(StatusCode::OK, body.to_string()).await;
    let store = Arc::new(KitchenStore::new(KitchenState::default()));
    let service = KitchenService::new(
        Arc::clone(&store),
        StructuredGenerationClient::new(Arc::new(server.provider())),
    );

    let error = service.track_meal("two eggs").await.unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert!(store.snapshot().await.meal_logs.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    let provider = GeminiProvider::new(API_KEY).with_base_url("http://127.0.0.1:1/v1beta");

    let error = provider.generate(&simple_request()).await.unwrap_err();
    assert!(error.is_unavailable(), "unexpected error: {error:?}");
}

#[tokio::test]
async fn test_slow_server_times_out_as_unavailable() {
    let server = MockServer::start_delayed(
        StatusCode::OK,
        candidate_body("{}"),
        Duration::from_secs(5),
    )
    .await;
    let config = LlmConfig {
        api_key: Some(API_KEY.to_owned()),
        base_url: server.base_url.clone(),
        timeout: Duration::from_millis(200),
        ..LlmConfig::default()
    };
    let provider = GeminiProvider::from_config(&config).unwrap();

    let error = provider.generate(&simple_request()).await.unwrap_err();
    assert!(error.is_unavailable());
    assert!(error.to_string().contains("timed out"), "error: {error}");
}

// ============================================================================
// Configuration and Health
// ============================================================================

#[tokio::test]
async fn test_from_config_requires_api_key() {
    let error = GeminiProvider::from_config(&LlmConfig::default()).unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigMissing);
    assert!(error.message.contains("GEMINI_API_KEY"));
}

#[tokio::test]
async fn test_health_check_uses_header_key() {
    let server = MockServer::start(StatusCode::OK, "{}").await;

    assert!(server.provider().health_check().await.unwrap());

    let wrong_key = GeminiProvider::new("wrong").with_base_url(server.base_url.clone());
    assert!(!wrong_key.health_check().await.unwrap());
}
