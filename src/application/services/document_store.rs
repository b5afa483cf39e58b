use std::sync::Arc;

use crate::application::ports::{DocumentExtractor, FileStorage};
use crate::application::services::text_chunker::TextChunker;
use crate::domain::entities::Document;
use crate::domain::repositories::DocumentRepository;
use crate::domain::value_objects::{DocumentSelector, FileHash};

/// Separator placed between documents when every document is selected.
pub const DOCUMENT_DELIMITER: &str = "\n\n---\n\n";

#[derive(Debug)]
pub enum DocumentStoreError {
    ExtractionError(String),
    NotFound(String),
    StorageError(String),
}

impl std::fmt::Display for DocumentStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStoreError::ExtractionError(msg) => write!(f, "Extraction error: {}", msg),
            DocumentStoreError::NotFound(name) => write!(f, "Document not found: {}", name),
            DocumentStoreError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentStoreError {}

/// Persists uploaded PDFs: raw bytes on disk, extracted text and chunks in the
/// document repository, both keyed by the upload's file name.
pub struct DocumentStore {
    document_extractor: Arc<dyn DocumentExtractor>,
    file_storage: Arc<dyn FileStorage>,
    document_repository: Arc<dyn DocumentRepository>,
    chunker: TextChunker,
}

impl DocumentStore {
    pub fn new(
        document_extractor: Arc<dyn DocumentExtractor>,
        file_storage: Arc<dyn FileStorage>,
        document_repository: Arc<dyn DocumentRepository>,
        chunker: TextChunker,
    ) -> Self {
        Self {
            document_extractor,
            file_storage,
            document_repository,
            chunker,
        }
    }

    /// Extracts, chunks and stores an upload, replacing any document with the
    /// same name. Nothing is written unless extraction succeeds, and the raw
    /// file is removed again if the record cannot be saved.
    pub async fn ingest(
        &self,
        data: &[u8],
        original_name: &str,
    ) -> Result<Document, DocumentStoreError> {
        let filename = sanitize_filename(original_name)?;

        if !self.document_extractor.can_extract(&filename) {
            return Err(DocumentStoreError::ExtractionError(format!(
                "{} is not a PDF document",
                filename
            )));
        }

        let extracted = self
            .document_extractor
            .extract_text(data)
            .await
            .map_err(|e| DocumentStoreError::ExtractionError(e.to_string()))?;

        if !extracted.page_errors.is_empty() {
            tracing::warn!(
                "{} page(s) of {} could not be extracted: {:?}",
                extracted.page_errors.len(),
                filename,
                extracted.page_errors
            );
        }
        if extracted.text.trim().is_empty() {
            tracing::warn!(
                "No text extracted from {} ({} pages); it may be a scanned document",
                filename,
                extracted.page_count
            );
        }

        let chunks = self.chunker.split(&extracted.text);
        let document = Document::new(
            filename.clone(),
            extracted.text,
            chunks,
            FileHash::from_bytes(data),
            data.len() as i64,
        );

        self.file_storage
            .store_file(data, &filename)
            .await
            .map_err(|e| DocumentStoreError::StorageError(e.to_string()))?;

        if let Err(e) = self.document_repository.upsert(&document).await {
            if let Err(cleanup) = self.file_storage.delete_file(&filename).await {
                tracing::error!(
                    "Failed to remove {} after record write failure: {}",
                    filename,
                    cleanup
                );
            }
            return Err(DocumentStoreError::StorageError(e.to_string()));
        }

        tracing::info!(
            "Ingested {} ({} bytes, {} chunks, sha256 {})",
            document.filename(),
            document.file_size(),
            document.chunk_count(),
            document.file_hash().short()
        );

        Ok(document)
    }

    pub async fn get(&self, filename: &str) -> Result<Document, DocumentStoreError> {
        self.document_repository
            .find_by_filename(filename)
            .await
            .map_err(|e| DocumentStoreError::StorageError(e.to_string()))?
            .ok_or_else(|| DocumentStoreError::NotFound(filename.to_string()))
    }

    pub async fn get_all(&self) -> Result<Vec<Document>, DocumentStoreError> {
        self.document_repository
            .find_all()
            .await
            .map_err(|e| DocumentStoreError::StorageError(e.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<String>, DocumentStoreError> {
        self.document_repository
            .list_filenames()
            .await
            .map_err(|e| DocumentStoreError::StorageError(e.to_string()))
    }

    /// Text for a selector: one document's content, or every document's
    /// content joined by [`DOCUMENT_DELIMITER`].
    pub async fn resolve_content(
        &self,
        selector: &DocumentSelector,
    ) -> Result<String, DocumentStoreError> {
        match selector {
            DocumentSelector::Named(name) => Ok(self.get(name).await?.content().to_string()),
            DocumentSelector::All => {
                let documents = self.get_all().await?;
                Ok(documents
                    .iter()
                    .map(Document::content)
                    .collect::<Vec<_>>()
                    .join(DOCUMENT_DELIMITER))
            }
        }
    }
}

/// Reduces an upload name to its final path component.
fn sanitize_filename(original_name: &str) -> Result<String, DocumentStoreError> {
    let name = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(DocumentStoreError::ExtractionError(format!(
            "Invalid file name: {:?}",
            original_name
        )));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FakeDocumentExtractor, InMemoryDocumentRepository, InMemoryFileStorage,
    };

    struct Fixture {
        store: DocumentStore,
        storage: Arc<InMemoryFileStorage>,
        repository: Arc<InMemoryDocumentRepository>,
    }

    fn fixture(chunk_size: usize) -> Fixture {
        let storage = Arc::new(InMemoryFileStorage::default());
        let repository = Arc::new(InMemoryDocumentRepository::default());
        let store = DocumentStore::new(
            Arc::new(FakeDocumentExtractor),
            storage.clone(),
            repository.clone(),
            TextChunker::new(chunk_size).unwrap(),
        );
        Fixture {
            store,
            storage,
            repository,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("notes.pdf").unwrap(), "notes.pdf");
        assert_eq!(sanitize_filename("../../etc/notes.pdf").unwrap(), "notes.pdf");
        assert_eq!(sanitize_filename("C:\\docs\\notes.pdf").unwrap(), "notes.pdf");
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename("dir/").is_err());
    }

    #[tokio::test]
    async fn test_ingest_stores_file_and_chunks() {
        let f = fixture(4);
        let document = f
            .store
            .ingest(&FakeDocumentExtractor::pdf("abcdefghij"), "letters.pdf")
            .await
            .unwrap();

        assert_eq!(document.content(), "abcdefghij");
        assert_eq!(document.chunks(), ["abcd", "efgh", "ij"]);
        assert!(f.storage.contains("letters.pdf"));
        assert_eq!(f.store.get("letters.pdf").await.unwrap(), document);
    }

    #[tokio::test]
    async fn test_reingest_overwrites_previous_content() {
        let f = fixture(3);
        f.store
            .ingest(&FakeDocumentExtractor::pdf("first version"), "notes.pdf")
            .await
            .unwrap();
        f.store
            .ingest(&FakeDocumentExtractor::pdf("second"), "notes.pdf")
            .await
            .unwrap();

        let stored = f.store.get("notes.pdf").await.unwrap();
        assert_eq!(stored.content(), "second");
        assert_eq!(stored.chunks(), ["sec", "ond"]);
        assert_eq!(f.store.list().await.unwrap(), vec!["notes.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_extraction_failure_writes_nothing() {
        let f = fixture(10);
        let err = f
            .store
            .ingest(&[0x13, 0x37, 0xde, 0xad], "random.pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::ExtractionError(_)));
        assert!(!f.storage.contains("random.pdf"));
        assert!(matches!(
            f.store.get("random.pdf").await,
            Err(DocumentStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_non_pdf_name_rejected() {
        let f = fixture(10);
        let err = f
            .store
            .ingest(&FakeDocumentExtractor::pdf("text"), "notes.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::ExtractionError(_)));
    }

    #[tokio::test]
    async fn test_record_failure_removes_raw_file() {
        let f = fixture(10);
        f.repository.fail_writes(true);

        let err = f
            .store
            .ingest(&FakeDocumentExtractor::pdf("content"), "orphan.pdf")
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::StorageError(_)));
        assert!(!f.storage.contains("orphan.pdf"));
    }

    #[tokio::test]
    async fn test_resolve_all_joins_documents() {
        let f = fixture(100);
        f.store
            .ingest(&FakeDocumentExtractor::pdf("Alpha"), "a.pdf")
            .await
            .unwrap();
        f.store
            .ingest(&FakeDocumentExtractor::pdf("Beta"), "b.pdf")
            .await
            .unwrap();

        let all = f.store.resolve_content(&DocumentSelector::All).await.unwrap();
        assert_eq!(all, format!("Alpha{}Beta", DOCUMENT_DELIMITER));

        let named = f
            .store
            .resolve_content(&DocumentSelector::Named("b.pdf".to_string()))
            .await
            .unwrap();
        assert_eq!(named, "Beta");

        assert!(matches!(
            f.store
                .resolve_content(&DocumentSelector::Named("missing.pdf".to_string()))
                .await,
            Err(DocumentStoreError::NotFound(_))
        ));
    }
}
