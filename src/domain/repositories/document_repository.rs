use async_trait::async_trait;

use crate::domain::entities::Document;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Inserts the document, replacing any record stored under the same filename.
    async fn upsert(&self, document: &Document) -> Result<(), DocumentRepositoryError>;
    async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError>;
    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError>;
    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError>;
}
