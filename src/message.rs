// src/message.rs
use serde::{Deserialize, Serialize};

pub const API_MESSAGE: &str = "StudyBuddy API is running.";
pub const SERVICE_NAME: &str = "StudyBuddy API";

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    pub message: String,
}

impl StatusPayload {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: API_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub service: String,
}

impl HealthPayload {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: SERVICE_NAME.to_string(),
        }
    }
}
