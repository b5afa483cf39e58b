pub mod chat_dto;
pub mod document_dto;
pub mod quiz_dto;
pub mod response_dto;
pub mod video_dto;

pub use chat_dto::*;
pub use document_dto::*;
pub use quiz_dto::*;
pub use response_dto::*;
pub use video_dto::*;
