// src/services/model.rs
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no text")]
    Empty,
}

/// A hosted text-generation model: text in, text out, may fail.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// One blocking-until-done generation call. No retry.
    async fn generate_content(&self, contents: &str) -> Result<String, ModelError>;
}
