pub mod completion_client;
pub mod document_extractors;
pub mod youtube_client;

pub use completion_client::OpenAiCompletionClient;
pub use youtube_client::YoutubeClient;
