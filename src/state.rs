// src/state.rs
use std::sync::Arc;

use crate::config::UpstreamErrorMode;
use crate::services::chatbot::Chatbot;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub chatbot: Chatbot,
    pub upstream_errors: UpstreamErrorMode,
}

impl AppState {
    pub fn new(chatbot: Chatbot, upstream_errors: UpstreamErrorMode) -> Self {
        Self {
            chatbot,
            upstream_errors,
        }
    }
}
