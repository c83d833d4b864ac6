// src/ui/mod.rs
//! Server-rendered chat page in front of the relay.
pub mod page;
pub mod relay_client;

use std::{sync::Arc, time::Duration};

use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::AppError;
use crate::services::session_manager::{MessageRole, SessionManager};
use page::{Notice, PageRenderer};
use relay_client::RelayClient;

pub type SharedUiState = Arc<UiState>;

pub struct UiState {
    pub sessions: SessionManager,
    pub relay: RelayClient,
    pub page: PageRenderer,
}

impl UiState {
    pub fn new(sessions: SessionManager, relay: RelayClient) -> Result<Self, minijinja::Error> {
        Ok(Self {
            sessions,
            relay,
            page: PageRenderer::new()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendForm {
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionForm {
    pub session_id: String,
}

pub fn create_ui_router() -> Router<SharedUiState> {
    Router::new()
        .route("/", get(index_page))
        .route("/send", post(send_handler))
        .route("/clear", post(clear_handler))
        .layer(TraceLayer::new_for_http())
}

fn page_url(session_id: &str) -> String {
    format!("/?session_id={session_id}")
}

// Session ids are always minted here as UUIDs; anything else starts over.
fn is_session_id(id: &str) -> bool {
    Uuid::parse_str(id).is_ok()
}

async fn render(
    state: &UiState,
    session_id: &str,
    notice: Option<Notice>,
) -> Result<Html<String>, AppError> {
    let messages = state
        .sessions
        .get_history(session_id)
        .await
        .unwrap_or_default();
    let status = state.sessions.get_status(session_id).await;
    let html = state
        .page
        .render(session_id, &messages, status, notice.as_ref())?;
    Ok(Html(html))
}

/// Re-checks relay health on every view so the send control reflects the
/// relay's current state.
async fn refresh_status(state: &UiState, session_id: &str) -> bool {
    let status = state.relay.check_health().await;
    state.sessions.set_status(session_id, status).await;
    status.is_online()
}

pub async fn index_page(
    State(state): State<SharedUiState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let session_id = match query.session_id {
        Some(id) if is_session_id(&id) => state.sessions.ensure_session(&id).await,
        _ => {
            let id = state.sessions.create_session().await;
            return Ok(Redirect::to(&page_url(&id)).into_response());
        }
    };

    refresh_status(&state, &session_id).await;
    Ok(render(&state, &session_id, None).await?.into_response())
}

pub async fn send_handler(
    State(state): State<SharedUiState>,
    Form(form): Form<SendForm>,
) -> Result<Response, AppError> {
    if !is_session_id(&form.session_id) {
        return Ok(Redirect::to("/").into_response());
    }
    let session_id = state.sessions.ensure_session(&form.session_id).await;
    let message = form.message.as_str();

    // Blank input never reaches the network.
    if message.trim().is_empty() {
        return Ok(render(&state, &session_id, Some(Notice::empty_input()))
            .await?
            .into_response());
    }

    if !refresh_status(&state, &session_id).await {
        return Ok(render(&state, &session_id, Some(Notice::offline()))
            .await?
            .into_response());
    }

    state
        .sessions
        .append_message(&session_id, MessageRole::User, message)
        .await;
    let reply = state.relay.send_message(message).await;
    state
        .sessions
        .append_message(&session_id, MessageRole::Assistant, reply)
        .await;

    Ok(render(&state, &session_id, None).await?.into_response())
}

pub async fn clear_handler(
    State(state): State<SharedUiState>,
    Form(form): Form<SessionForm>,
) -> Redirect {
    if !is_session_id(&form.session_id) {
        return Redirect::to("/");
    }
    if !state.sessions.clear_history(&form.session_id).await {
        state.sessions.ensure_session(&form.session_id).await;
    }
    Redirect::to(&page_url(&form.session_id))
}

/// Periodically drops idle transcripts.
pub fn spawn_session_reaper(sessions: SessionManager) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period = sessions.ttl().max(Duration::from_secs(1));
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = sessions.purge_expired().await;
            if removed > 0 {
                tracing::info!(removed, "purged idle sessions");
            }
        }
    })
}
