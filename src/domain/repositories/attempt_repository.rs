use async_trait::async_trait;

use crate::domain::entities::QuizAttempt;

#[derive(Debug)]
pub enum AttemptRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for AttemptRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AttemptRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for AttemptRepositoryError {}

/// Append-only ledger of graded quiz attempts.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn append(&self, attempt: &QuizAttempt) -> Result<(), AttemptRepositoryError>;
    /// Newest first by timestamp; attempts sharing a timestamp come back in
    /// reverse insertion order.
    async fn recent(&self, limit: i64) -> Result<Vec<QuizAttempt>, AttemptRepositoryError>;
}
