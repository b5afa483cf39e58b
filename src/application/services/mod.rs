pub mod chat_service;
pub mod document_store;
pub mod prompt_builder;
pub mod quiz_engine;
pub mod text_chunker;

pub use chat_service::ChatService;
pub use document_store::DocumentStore;
pub use prompt_builder::PromptBuilder;
pub use quiz_engine::QuizEngine;
pub use text_chunker::TextChunker;
