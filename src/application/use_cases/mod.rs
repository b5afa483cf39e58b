pub mod chat_sessions;
pub mod generate_quiz;
pub mod get_progress;
pub mod list_documents;
pub mod recommend_videos;
pub mod send_chat_message;
pub mod submit_quiz;
pub mod upload_document;

pub use chat_sessions::{
    CreateChatSessionUseCase, DeleteChatSessionUseCase, GetChatSessionUseCase,
    ListChatSessionsUseCase,
};
pub use generate_quiz::GenerateQuizUseCase;
pub use get_progress::GetProgressUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use recommend_videos::RecommendVideosUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use submit_quiz::SubmitQuizUseCase;
pub use upload_document::UploadDocumentUseCase;
