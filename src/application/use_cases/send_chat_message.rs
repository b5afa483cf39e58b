use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::ChatService;
use crate::application::services::chat_service::ChatServiceError;
use crate::domain::value_objects::DocumentSelector;

#[derive(Debug, Clone)]
pub struct SendChatMessageRequest {
    pub message: String,
    pub pdf_name: Option<String>,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct SendChatMessageResponse {
    pub reply: String,
    pub session_id: Option<Uuid>,
}

pub struct SendChatMessageUseCase {
    chat_service: Arc<ChatService>,
}

impl SendChatMessageUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(
        &self,
        request: SendChatMessageRequest,
    ) -> Result<SendChatMessageResponse, ChatServiceError> {
        let selector = DocumentSelector::parse_optional(request.pdf_name.as_deref());

        let reply = self
            .chat_service
            .reply(&request.message, selector.as_ref(), request.session_id)
            .await?;

        Ok(SendChatMessageResponse {
            reply,
            session_id: request.session_id,
        })
    }
}
