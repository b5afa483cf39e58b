pub mod attempt_repository;
pub mod chat_session_repository;
pub mod document_repository;

pub use attempt_repository::AttemptRepository;
pub use chat_session_repository::ChatSessionRepository;
pub use document_repository::DocumentRepository;
