// src/main.rs
use std::sync::Arc;

use studybuddy_relay::{
    config::{self, RelayConfig},
    routes,
    services::{chatbot::Chatbot, gemini::GeminiClient},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studybuddy_relay::init_tracing("studybuddy_relay=info,tower_http=info");

    config::load_dotenv()?;
    // No credential, no server.
    let cfg = RelayConfig::from_env()?;
    tracing::info!(
        model = %cfg.gemini.model,
        upstream_errors = ?cfg.upstream_errors,
        "configuration loaded"
    );

    let client = GeminiClient::new(cfg.gemini.clone())?;
    let state = Arc::new(AppState::new(
        Chatbot::new(Arc::new(client)),
        cfg.upstream_errors,
    ));

    let app = routes::create_router().with_state(state);

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 StudyBuddy relay running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
