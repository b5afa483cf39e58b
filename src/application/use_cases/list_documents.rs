use std::sync::Arc;

use crate::application::services::DocumentStore;

#[derive(Debug, Clone)]
pub struct ListDocumentsResponse {
    pub filenames: Vec<String>,
}

pub struct ListDocumentsUseCase {
    document_store: Arc<DocumentStore>,
}

impl ListDocumentsUseCase {
    pub fn new(document_store: Arc<DocumentStore>) -> Self {
        Self { document_store }
    }

    /// Never fails: a store that cannot be read lists as empty.
    pub async fn execute(&self) -> ListDocumentsResponse {
        let filenames = match self.document_store.list().await {
            Ok(filenames) => filenames,
            Err(e) => {
                tracing::warn!("Failed to list documents: {}", e);
                Vec::new()
            }
        };

        ListDocumentsResponse { filenames }
    }
}
