// src/routes/chat.rs
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    config::UpstreamErrorMode,
    error::AppError,
    message::{ChatReply, ChatRequest, HealthPayload, StatusPayload},
    services::chatbot::error_reply,
    state::SharedState,
};

pub async fn root_handler() -> Json<StatusPayload> {
    Json(StatusPayload::ok())
}

// Liveness of this process only; the model is never consulted.
pub async fn health_handler() -> Json<HealthPayload> {
    Json(HealthPayload::healthy())
}

pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<(StatusCode, Json<ChatReply>), AppError> {
    // Whitespace is still a prompt; only a literally empty string is refused.
    if payload.prompt.is_empty() {
        return Err(AppError::BadRequest("Prompt cannot be empty".to_string()));
    }

    tracing::info!(chars = payload.prompt.len(), "chat request");

    let (status, response) = match state.upstream_errors {
        UpstreamErrorMode::Embed => (
            StatusCode::OK,
            state.chatbot.generate_response(&payload.prompt).await,
        ),
        UpstreamErrorMode::Status => match state.chatbot.generate(&payload.prompt).await {
            Ok(text) => (StatusCode::OK, text),
            Err(err) => {
                tracing::error!(error = %err, "model call failed");
                (StatusCode::BAD_GATEWAY, error_reply(&err))
            }
        },
    };

    Ok((status, Json(ChatReply { response })))
}
