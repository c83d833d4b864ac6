// src/bin/studybuddy-ui.rs
use std::sync::Arc;

use studybuddy_relay::{
    config::{self, UiConfig},
    services::session_manager::SessionManager,
    ui::{self, UiState, relay_client::RelayClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    studybuddy_relay::init_tracing("studybuddy_ui=info,studybuddy_relay=info,tower_http=info");

    config::load_dotenv()?;
    let cfg = UiConfig::from_env()?;

    let sessions = SessionManager::new(cfg.session_ttl);
    let relay = RelayClient::new(cfg.backend_url.clone())?;
    let state = Arc::new(UiState::new(sessions.clone(), relay)?);

    ui::spawn_session_reaper(sessions);

    let app = ui::create_ui_router().with_state(state);

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(backend = %cfg.backend_url, "🎓 StudyBuddy UI running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
