use std::sync::Arc;

use crate::application::services::document_store::{DocumentStore, DocumentStoreError};

#[derive(Debug)]
pub enum UploadDocumentError {
    ValidationError(String),
    ExtractionError(String),
    StorageError(String),
}

impl std::fmt::Display for UploadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadDocumentError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            UploadDocumentError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            UploadDocumentError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for UploadDocumentError {}

impl From<DocumentStoreError> for UploadDocumentError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::ExtractionError(msg) => UploadDocumentError::ExtractionError(msg),
            DocumentStoreError::NotFound(name) | DocumentStoreError::StorageError(name) => {
                UploadDocumentError::StorageError(name)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentResponse {
    pub filename: String,
    pub chunks: usize,
    pub file_size: i64,
    pub file_hash: String,
}

pub struct UploadDocumentUseCase {
    document_store: Arc<DocumentStore>,
}

impl UploadDocumentUseCase {
    pub fn new(document_store: Arc<DocumentStore>) -> Self {
        Self { document_store }
    }

    pub async fn execute(
        &self,
        request: UploadDocumentRequest,
    ) -> Result<UploadDocumentResponse, UploadDocumentError> {
        if request.file_name.trim().is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File name cannot be empty".to_string(),
            ));
        }

        if request.file_data.is_empty() {
            return Err(UploadDocumentError::ValidationError(
                "File data cannot be empty".to_string(),
            ));
        }

        let document = self
            .document_store
            .ingest(&request.file_data, &request.file_name)
            .await?;

        Ok(UploadDocumentResponse {
            filename: document.filename().to_string(),
            chunks: document.chunk_count(),
            file_size: document.file_size(),
            file_hash: document.file_hash().to_string(),
        })
    }
}
