pub mod chat_session;
pub mod document;
pub mod question;
pub mod quiz_attempt;
pub mod video;

pub use chat_session::{ChatMessage, ChatRole, ChatSession};
pub use document::Document;
pub use question::{Question, QuestionType};
pub use quiz_attempt::QuizAttempt;
pub use video::Video;
