use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::send_chat_message::{
    SendChatMessageRequest, SendChatMessageResponse,
};
use crate::domain::entities::{ChatMessage, ChatRole, ChatSession};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestDto {
    pub message: String,
    pub pdf_name: Option<String>,
    pub session_id: Option<Uuid>,
}

impl From<ChatRequestDto> for SendChatMessageRequest {
    fn from(dto: ChatRequestDto) -> Self {
        Self {
            message: dto.message,
            pdf_name: dto.pdf_name,
            session_id: dto.session_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseDto {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

impl From<SendChatMessageResponse> for ChatResponseDto {
    fn from(response: SendChatMessageResponse) -> Self {
        Self {
            reply: response.reply,
            session_id: response.session_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequestDto {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessageDto {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role(),
            content: message.content().to_string(),
            timestamp: message.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatSessionDto {
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<ChatMessageDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatSession> for ChatSessionDto {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id(),
            title: session.title().to_string(),
            messages: session.messages().iter().map(ChatMessageDto::from).collect(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// Session listing entry, without messages.
#[derive(Debug, Serialize)]
pub struct ChatSessionSummaryDto {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatSession> for ChatSessionSummaryDto {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id(),
            title: session.title().to_string(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}
