use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, ChatSession};

#[derive(Debug)]
pub enum ChatSessionRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChatSessionRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatSessionRepositoryError::NotFound(id) => write!(f, "Chat session not found: {}", id),
            ChatSessionRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChatSessionRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ChatSessionRepositoryError {}

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn create(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError>;
    /// Loads the session together with its messages in insertion order.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, ChatSessionRepositoryError>;
    /// Session summaries, most recently updated first. Messages are not loaded.
    async fn list(&self) -> Result<Vec<ChatSession>, ChatSessionRepositoryError>;
    /// Appends one user turn and its reply in a single write. When `title` is
    /// given the session is renamed in the same write.
    async fn append_exchange(
        &self,
        session_id: Uuid,
        title: Option<&str>,
        user: &ChatMessage,
        assistant: &ChatMessage,
    ) -> Result<(), ChatSessionRepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ChatSessionRepositoryError>;
}
