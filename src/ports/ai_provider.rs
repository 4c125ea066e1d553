//! Port for the generative paraphrasing backend.
//!
//! The backend never decides content. It receives already-final
//! template text and may reword the tone; the caller re-validates the
//! result and falls back to the template on any failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

#[derive(Debug, Error)]
pub enum AIError {
    #[error("AI provider rate limit exceeded")]
    RateLimited,

    #[error("AI provider request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("AI provider unavailable: {0}")]
    Unavailable(String),

    #[error("network error calling AI provider: {0}")]
    Network(String),

    #[error("AI provider authentication failed")]
    AuthenticationFailed,

    #[error("invalid AI provider request: {0}")]
    InvalidRequest(String),

    #[error("unexpected AI provider response: {0}")]
    UnexpectedResponse(String),
}

impl AIError {
    /// Transient failures that a retry might clear.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited | AIError::Timeout { .. } | AIError::Network(_)
        )
    }
}

#[async_trait]
pub trait AIProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
