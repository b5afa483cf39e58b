pub mod completion_provider;
pub mod document_extractor;
pub mod file_storage;
pub mod video_provider;

pub use completion_provider::CompletionProvider;
pub use document_extractor::DocumentExtractor;
pub use file_storage::FileStorage;
pub use video_provider::VideoProvider;
