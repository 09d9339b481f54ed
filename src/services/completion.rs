use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub schema: Value,
    pub temperature: f32,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
    #[error("{0}")]
    Provider(String),
    #[error("{0}")]
    Unknown(String),
}

#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(
        &self,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}
