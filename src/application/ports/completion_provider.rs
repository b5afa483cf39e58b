use async_trait::async_trait;

use crate::domain::entities::ChatRole;

#[derive(Debug)]
pub enum CompletionProviderError {
    /// No credential is configured. Nothing was sent.
    NotConfigured,
    NetworkError(String),
    ApiError(String),
}

impl std::fmt::Display for CompletionProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionProviderError::NotConfigured => {
                write!(f, "Completion provider credential is not configured")
            }
            CompletionProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            CompletionProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for CompletionProviderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    /// Earlier turns, oldest first, sent between the system and user prompts.
    pub history: Vec<ConversationTurn>,
    pub user_prompt: String,
    pub response_format: ResponseFormat,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest)
    -> Result<String, CompletionProviderError>;

    fn is_configured(&self) -> bool;

    fn model_name(&self) -> &str;
}
