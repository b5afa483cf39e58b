use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, ChatRole, ChatSession};
use crate::infrastructure::database::models::{decode_timestamp, encode_timestamp};
use crate::infrastructure::database::schema::{chat_messages, chat_sessions};

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = chat_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatSessionModel {
    pub id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = chat_messages)]
#[diesel(primary_key(seq))]
#[diesel(belongs_to(ChatSessionModel, foreign_key = session_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ChatMessageModel {
    pub seq: i32,
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = chat_messages)]
pub struct NewChatMessageModel {
    pub session_id: String,
    pub role: String,
    pub content: String,
    pub created_at: String,
}

impl From<&ChatSession> for ChatSessionModel {
    fn from(session: &ChatSession) -> Self {
        Self {
            id: session.id().to_string(),
            title: session.title().to_string(),
            created_at: encode_timestamp(session.created_at()),
            updated_at: encode_timestamp(session.updated_at()),
        }
    }
}

impl NewChatMessageModel {
    pub fn new(session_id: Uuid, message: &ChatMessage) -> Self {
        Self {
            session_id: session_id.to_string(),
            role: message.role().as_str().to_string(),
            content: message.content().to_string(),
            created_at: encode_timestamp(message.created_at()),
        }
    }
}

impl TryFrom<ChatMessageModel> for ChatMessage {
    type Error = String;

    fn try_from(model: ChatMessageModel) -> Result<Self, Self::Error> {
        Ok(ChatMessage::restore(
            ChatRole::from_string(&model.role)?,
            model.content,
            decode_timestamp(&model.created_at)?,
        ))
    }
}

impl ChatSessionModel {
    pub fn into_domain(self, messages: Vec<ChatMessageModel>) -> Result<ChatSession, String> {
        let id = Uuid::parse_str(&self.id).map_err(|e| format!("Invalid session id: {}", e))?;
        let messages = messages
            .into_iter()
            .map(ChatMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ChatSession::restore(
            id,
            self.title,
            decode_timestamp(&self.created_at)?,
            decode_timestamp(&self.updated_at)?,
            messages,
        ))
    }
}
