pub mod chat_handler;
pub mod document_handler;
pub mod quiz_handler;
pub mod video_handler;

pub use chat_handler::ChatHandler;
pub use document_handler::DocumentHandler;
pub use quiz_handler::QuizHandler;
pub use video_handler::VideoHandler;
