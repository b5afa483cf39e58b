use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::ChatService;
use crate::application::services::chat_service::ChatServiceError;
use crate::domain::entities::ChatSession;

#[derive(Debug, Clone, Default)]
pub struct CreateChatSessionRequest {
    pub title: Option<String>,
}

pub struct CreateChatSessionUseCase {
    chat_service: Arc<ChatService>,
}

impl CreateChatSessionUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(
        &self,
        request: CreateChatSessionRequest,
    ) -> Result<ChatSession, ChatServiceError> {
        self.chat_service.create_session(request.title).await
    }
}

pub struct GetChatSessionUseCase {
    chat_service: Arc<ChatService>,
}

impl GetChatSessionUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(&self, session_id: Uuid) -> Result<ChatSession, ChatServiceError> {
        self.chat_service.get_session(session_id).await
    }
}

pub struct ListChatSessionsUseCase {
    chat_service: Arc<ChatService>,
}

impl ListChatSessionsUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(&self) -> Result<Vec<ChatSession>, ChatServiceError> {
        self.chat_service.list_sessions().await
    }
}

pub struct DeleteChatSessionUseCase {
    chat_service: Arc<ChatService>,
}

impl DeleteChatSessionUseCase {
    pub fn new(chat_service: Arc<ChatService>) -> Self {
        Self { chat_service }
    }

    pub async fn execute(&self, session_id: Uuid) -> Result<(), ChatServiceError> {
        self.chat_service.delete_session(session_id).await
    }
}
