//! In-memory fakes for the ports and repositories, shared by unit and
//! router tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::completion_provider::{
    CompletionProvider, CompletionProviderError, CompletionRequest,
};
use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};
use crate::application::ports::video_provider::{VideoProvider, VideoProviderError};
use crate::domain::entities::{ChatMessage, ChatSession, Document, QuizAttempt, Video};
use crate::domain::repositories::attempt_repository::{AttemptRepository, AttemptRepositoryError};
use crate::domain::repositories::chat_session_repository::{
    ChatSessionRepository, ChatSessionRepositoryError,
};
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError,
};

const FAKE_PDF_MAGIC: &[u8] = b"%PDF-fake\n";

/// Treats any payload starting with a fake PDF header as a one-page document
/// whose text is the rest of the payload.
pub struct FakeDocumentExtractor;

impl FakeDocumentExtractor {
    pub fn pdf(text: &str) -> Vec<u8> {
        let mut data = FAKE_PDF_MAGIC.to_vec();
        data.extend_from_slice(text.as_bytes());
        data
    }
}

#[async_trait]
impl DocumentExtractor for FakeDocumentExtractor {
    async fn extract_text(&self, data: &[u8]) -> Result<ExtractedContent, DocumentExtractionError> {
        let body = data
            .strip_prefix(FAKE_PDF_MAGIC)
            .ok_or_else(|| DocumentExtractionError::CorruptedFile("missing PDF header".into()))?;
        let text = String::from_utf8(body.to_vec())
            .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))?;

        Ok(ExtractedContent {
            text,
            page_count: 1,
            page_errors: Vec::new(),
        })
    }

    fn can_extract(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(".pdf")
    }
}

#[derive(Default)]
pub struct InMemoryFileStorage {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryFileStorage {
    pub fn contains(&self, file_name: &str) -> bool {
        self.files.lock().unwrap().contains_key(file_name)
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store_file(&self, data: &[u8], file_name: &str) -> Result<StoredFile, FileStorageError> {
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), data.to_vec());
        Ok(StoredFile {
            file_name: file_name.to_string(),
            path: format!("memory://{}", file_name),
            size: data.len() as u64,
        })
    }

    async fn delete_file(&self, file_name: &str) -> Result<bool, FileStorageError> {
        Ok(self.files.lock().unwrap().remove(file_name).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<BTreeMap<String, Document>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryDocumentRepository {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<(), DocumentRepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DocumentRepositoryError::DatabaseError("read failed".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn upsert(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DocumentRepositoryError::DatabaseError("write failed".into()));
        }
        self.documents
            .lock()
            .unwrap()
            .insert(document.filename().to_string(), document.clone());
        Ok(())
    }

    async fn find_by_filename(
        &self,
        filename: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        self.check_reads()?;
        Ok(self.documents.lock().unwrap().get(filename).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        self.check_reads()?;
        Ok(self.documents.lock().unwrap().values().cloned().collect())
    }

    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError> {
        self.check_reads()?;
        Ok(self.documents.lock().unwrap().keys().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: Mutex<Vec<QuizAttempt>>,
    fail_reads: AtomicBool,
}

impl InMemoryAttemptRepository {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn append(&self, attempt: &QuizAttempt) -> Result<(), AttemptRepositoryError> {
        self.attempts.lock().unwrap().push(attempt.clone());
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<QuizAttempt>, AttemptRepositoryError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AttemptRepositoryError::DatabaseError("read failed".into()));
        }

        let attempts = self.attempts.lock().unwrap();
        let mut indexed: Vec<(usize, &QuizAttempt)> = attempts.iter().enumerate().collect();
        indexed.sort_by(|(a_seq, a), (b_seq, b)| {
            b.timestamp().cmp(&a.timestamp()).then(b_seq.cmp(a_seq))
        });

        Ok(indexed
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|(_, attempt)| attempt.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryChatSessionRepository {
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
    fail_writes: AtomicBool,
}

impl InMemoryChatSessionRepository {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatSessionRepository for InMemoryChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
        Ok(self.sessions.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
        let mut sessions: Vec<ChatSession> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .map(|s| {
                ChatSession::restore(s.id(), s.title().to_string(), s.created_at(), s.updated_at(), Vec::new())
            })
            .collect();
        sessions.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(sessions)
    }

    async fn append_exchange(
        &self,
        session_id: Uuid,
        title: Option<&str>,
        user: &ChatMessage,
        assistant: &ChatMessage,
    ) -> Result<(), ChatSessionRepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ChatSessionRepositoryError::DatabaseError("write failed".into()));
        }

        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get(&session_id)
            .ok_or(ChatSessionRepositoryError::NotFound(session_id))?;

        let mut messages = session.messages().to_vec();
        messages.push(user.clone());
        messages.push(assistant.clone());
        let updated = ChatSession::restore(
            session.id(),
            title.unwrap_or(session.title()).to_string(),
            session.created_at(),
            Utc::now(),
            messages,
        );
        sessions.insert(session_id, updated);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ChatSessionRepositoryError> {
        Ok(self.sessions.lock().unwrap().remove(&id).is_some())
    }
}

enum StubReply {
    Text(String),
    Failure(String),
}

/// Completion provider that answers every request with a canned reply and
/// records what it was asked.
pub struct StubCompletionProvider {
    configured: bool,
    reply: StubReply,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl StubCompletionProvider {
    pub fn replying(reply: &str) -> Self {
        Self::build(true, StubReply::Text(reply.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::build(true, StubReply::Failure(message.to_string()))
    }

    pub fn unconfigured() -> Self {
        Self::build(false, StubReply::Failure("unconfigured".to_string()))
    }

    fn build(configured: bool, reply: StubReply) -> Self {
        Self {
            configured,
            reply,
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletionProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionProviderError> {
        if !self.configured {
            return Err(CompletionProviderError::NotConfigured);
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Failure(message) => Err(CompletionProviderError::ApiError(message.clone())),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

pub struct StubVideoProvider {
    configured: bool,
    videos: Option<Vec<Video>>,
    queries: Mutex<Vec<String>>,
}

impl StubVideoProvider {
    pub fn returning(videos: Vec<Video>) -> Self {
        Self {
            configured: true,
            videos: Some(videos),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            configured: true,
            videos: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            videos: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoProvider for StubVideoProvider {
    async fn search(&self, query: &str, _max_results: u32) -> Result<Vec<Video>, VideoProviderError> {
        if !self.configured {
            return Err(VideoProviderError::NotConfigured);
        }
        self.queries.lock().unwrap().push(query.to_string());
        self.videos
            .clone()
            .ok_or_else(|| VideoProviderError::ApiError("quota exceeded".to_string()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
