// src/ui/relay_client.rs
use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::message::{ChatReply, ChatRequest};
use crate::services::session_manager::ApiStatus;

pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);
/// Generation is slow; give the model room.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client the chat page uses to reach the relay.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn check_health(&self) -> ApiStatus {
        let result = self
            .client
            .get(format!("{}/health", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status() == StatusCode::OK => ApiStatus::Online,
            Ok(resp) => {
                tracing::warn!(status = resp.status().as_u16(), "relay health check failed");
                ApiStatus::Error
            }
            Err(e) => {
                tracing::warn!(error = %e, "relay unreachable");
                ApiStatus::Offline
            }
        }
    }

    /// Always yields something to show: the reply, or an error line.
    pub async fn send_message(&self, message: &str) -> String {
        let result = self
            .client
            .post(format!("{}/chat", self.base_url))
            .timeout(CHAT_TIMEOUT)
            .json(&ChatRequest {
                prompt: message.to_string(),
            })
            .send()
            .await;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => return format!("❌ Connection Error: {e}"),
        };

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return format!("❌ Error: {} - {}", status.as_u16(), body);
        }

        match resp.json::<ChatReply>().await {
            Ok(reply) => reply.response,
            Err(e) => format!("❌ Connection Error: {e}"),
        }
    }
}
