use async_trait::async_trait;

use crate::domain::entities::Video;

#[derive(Debug)]
pub enum VideoProviderError {
    NotConfigured,
    NetworkError(String),
    ApiError(String),
}

impl std::fmt::Display for VideoProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoProviderError::NotConfigured => write!(f, "Video provider is not configured"),
            VideoProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            VideoProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
        }
    }
}

impl std::error::Error for VideoProviderError {}

#[async_trait]
pub trait VideoProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: u32)
    -> Result<Vec<Video>, VideoProviderError>;

    fn is_configured(&self) -> bool;
}
