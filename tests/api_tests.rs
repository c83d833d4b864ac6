use studybuddy_relay::config::{ConfigError, RelayConfig, UpstreamErrorMode};
use studybuddy_relay::message::{ChatReply, HealthPayload, StatusPayload};
use studybuddy_relay::routes::create_router;
use studybuddy_relay::services::chatbot::{Chatbot, ERROR_MARKER, build_prompt};
use studybuddy_relay::services::model::{ModelError, TextModel};
use studybuddy_relay::state::AppState;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

#[derive(Default)]
struct RecordingModel {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl TextModel for RecordingModel {
    fn model_name(&self) -> &str {
        "recording"
    }

    async fn generate_content(&self, contents: &str) -> Result<String, ModelError> {
        self.seen.lock().unwrap().push(contents.to_string());
        Ok("Binary search halves the range each step.".to_string())
    }
}

struct FailingModel;

#[async_trait]
impl TextModel for FailingModel {
    fn model_name(&self) -> &str {
        "failing"
    }

    async fn generate_content(&self, _contents: &str) -> Result<String, ModelError> {
        Err(ModelError::Transport("connection refused".to_string()))
    }
}

fn app_with(model: Arc<dyn TextModel>, mode: UpstreamErrorMode) -> Router {
    let state = Arc::new(AppState::new(Chatbot::new(model), mode));
    create_router().with_state(state)
}

fn chat_request(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_root_endpoint() {
    let app = app_with(Arc::new(FailingModel), UpstreamErrorMode::Embed);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload: StatusPayload = body_json(response).await;
    assert_eq!(payload.status, "ok");
    assert_eq!(payload.message, "StudyBuddy API is running.");
}

#[tokio::test]
async fn test_health_ignores_upstream_and_is_stable() {
    // The model always fails; health must not care.
    let app = app_with(Arc::new(FailingModel), UpstreamErrorMode::Status);

    let first = app.clone().oneshot(get("/health")).await.unwrap();
    let second = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);

    let first: HealthPayload = body_json(first).await;
    let second: HealthPayload = body_json(second).await;
    assert_eq!(first.status, "healthy");
    assert_eq!(first.service, "StudyBuddy API");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_chat_relays_model_text_verbatim() {
    let model = Arc::new(RecordingModel::default());
    let app = app_with(model.clone(), UpstreamErrorMode::Embed);

    let response = app
        .oneshot(chat_request(r#"{"prompt": "Explain binary search with code"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply: ChatReply = body_json(response).await;
    assert_eq!(reply.response, "Binary search halves the range each step.");

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], build_prompt("Explain binary search with code"));
    assert!(seen[0].ends_with("\n\nUser: Explain binary search with code"));
}

#[tokio::test]
async fn test_chat_without_prompt_is_rejected() {
    let model = Arc::new(RecordingModel::default());
    let app = app_with(model.clone(), UpstreamErrorMode::Embed);

    let missing = app
        .clone()
        .oneshot(chat_request(r#"{"message": "hello"}"#))
        .await
        .unwrap();
    assert!(missing.status().is_client_error());

    let wrong_type = app
        .clone()
        .oneshot(chat_request(r#"{"prompt": 42}"#))
        .await
        .unwrap();
    assert!(wrong_type.status().is_client_error());

    let not_json = app.oneshot(chat_request("prompt=hello")).await.unwrap();
    assert!(not_json.status().is_client_error());

    assert!(model.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_whitespace_prompt_reaches_model() {
    let model = Arc::new(RecordingModel::default());
    let app = app_with(model.clone(), UpstreamErrorMode::Embed);

    for body in [r#"{"prompt": "   "}"#, r#"{"prompt": "\n"}"#] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "body: {body}");

        let reply: ChatReply = body_json(response).await;
        assert_eq!(reply.response, "Binary search halves the range each step.");
    }

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.as_slice(), [build_prompt("   "), build_prompt("\n")]);
}

#[tokio::test]
async fn test_empty_prompt_is_bad_request() {
    let model = Arc::new(RecordingModel::default());
    let app = app_with(model.clone(), UpstreamErrorMode::Embed);

    let response = app.oneshot(chat_request(r#"{"prompt": ""}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body["error"], "Prompt cannot be empty");
    assert!(model.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_embedded_in_ok_reply() {
    let app = app_with(Arc::new(FailingModel), UpstreamErrorMode::Embed);

    let response = app
        .oneshot(chat_request(r#"{"prompt": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply: ChatReply = body_json(response).await;
    assert!(reply.response.starts_with(ERROR_MARKER));
    assert!(reply.response.contains("connection refused"));
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway_in_status_mode() {
    let app = app_with(Arc::new(FailingModel), UpstreamErrorMode::Status);

    let response = app
        .oneshot(chat_request(r#"{"prompt": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let reply: ChatReply = body_json(response).await;
    assert!(reply.response.starts_with(ERROR_MARKER));
}

#[tokio::test]
async fn test_status_mode_success_is_ok() {
    let app = app_with(Arc::new(RecordingModel::default()), UpstreamErrorMode::Status);

    let response = app
        .oneshot(chat_request(r#"{"prompt": "hello"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_allows_any_origin_with_credentials() {
    let app = app_with(Arc::new(FailingModel), UpstreamErrorMode::Embed);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:8501")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:8501"
    );
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[test]
fn test_missing_credential_blocks_startup() {
    let err = RelayConfig::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));
    assert_eq!(err.to_string(), "GEMINI_API_KEY not set in .env file.");
}
