use std::sync::Arc;

use crate::domain::entities::QuizAttempt;
use crate::domain::repositories::AttemptRepository;

pub const DEFAULT_PROGRESS_LIMIT: i64 = 10;
pub const MAX_PROGRESS_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default)]
pub struct GetProgressRequest {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct GetProgressResponse {
    pub attempts: Vec<QuizAttempt>,
}

pub struct GetProgressUseCase {
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl GetProgressUseCase {
    pub fn new(attempt_repository: Arc<dyn AttemptRepository>) -> Self {
        Self { attempt_repository }
    }

    /// Most recent attempts first. Read failures degrade to an empty history.
    pub async fn execute(&self, request: GetProgressRequest) -> GetProgressResponse {
        let limit = request
            .limit
            .unwrap_or(DEFAULT_PROGRESS_LIMIT)
            .clamp(0, MAX_PROGRESS_LIMIT);

        let attempts = match self.attempt_repository.recent(limit).await {
            Ok(attempts) => attempts,
            Err(e) => {
                tracing::warn!("Failed to load quiz progress: {}", e);
                Vec::new()
            }
        };

        GetProgressResponse { attempts }
    }
}
