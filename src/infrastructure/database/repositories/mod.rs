pub mod sqlite_attempt_repository;
pub mod sqlite_chat_session_repository;
pub mod sqlite_document_repository;

pub use sqlite_attempt_repository::SqliteAttemptRepository;
pub use sqlite_chat_session_repository::SqliteChatSessionRepository;
pub use sqlite_document_repository::SqliteDocumentRepository;
