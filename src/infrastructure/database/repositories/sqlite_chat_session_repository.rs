use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{ChatMessage, ChatSession};
use crate::domain::repositories::{
    ChatSessionRepository, chat_session_repository::ChatSessionRepositoryError,
};
use crate::infrastructure::database::models::{
    ChatMessageModel, ChatSessionModel, NewChatMessageModel, encode_timestamp,
};
use crate::infrastructure::database::schema::{chat_messages, chat_sessions};
use crate::infrastructure::database::{DatabaseError, DbPool, with_connection};

pub struct SqliteChatSessionRepository {
    pool: DbPool,
}

impl SqliteChatSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn database_error(error: DatabaseError) -> ChatSessionRepositoryError {
    ChatSessionRepositoryError::DatabaseError(error.to_string())
}

#[async_trait]
impl ChatSessionRepository for SqliteChatSessionRepository {
    async fn create(&self, session: &ChatSession) -> Result<(), ChatSessionRepositoryError> {
        let model = ChatSessionModel::from(session);
        let messages: Vec<NewChatMessageModel> = session
            .messages()
            .iter()
            .map(|m| NewChatMessageModel::new(session.id(), m))
            .collect();

        with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                diesel::insert_into(chat_sessions::table)
                    .values(&model)
                    .execute(conn)?;
                if !messages.is_empty() {
                    diesel::insert_into(chat_messages::table)
                        .values(&messages)
                        .execute(conn)?;
                }
                Ok(())
            })
        })
        .await
        .map_err(database_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ChatSession>, ChatSessionRepositoryError> {
        let key = id.to_string();
        let found = with_connection(&self.pool, move |conn| {
            let Some(session) = chat_sessions::table
                .find(&key)
                .select(ChatSessionModel::as_select())
                .first(conn)
                .optional()?
            else {
                return Ok(None);
            };

            let messages = ChatMessageModel::belonging_to(&session)
                .order(chat_messages::seq.asc())
                .select(ChatMessageModel::as_select())
                .load(conn)?;

            Ok(Some((session, messages)))
        })
        .await
        .map_err(database_error)?;

        found
            .map(|(session, messages)| session.into_domain(messages))
            .transpose()
            .map_err(ChatSessionRepositoryError::ValidationError)
    }

    async fn list(&self) -> Result<Vec<ChatSession>, ChatSessionRepositoryError> {
        let models = with_connection(&self.pool, |conn| {
            chat_sessions::table
                .order(chat_sessions::updated_at.desc())
                .select(ChatSessionModel::as_select())
                .load(conn)
        })
        .await
        .map_err(database_error)?;

        models
            .into_iter()
            .map(|model| model.into_domain(Vec::new()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(ChatSessionRepositoryError::ValidationError)
    }

    async fn append_exchange(
        &self,
        session_id: Uuid,
        title: Option<&str>,
        user: &ChatMessage,
        assistant: &ChatMessage,
    ) -> Result<(), ChatSessionRepositoryError> {
        let key = session_id.to_string();
        let title = title.map(str::to_string);
        let rows = vec![
            NewChatMessageModel::new(session_id, user),
            NewChatMessageModel::new(session_id, assistant),
        ];
        let touched_at = encode_timestamp(Utc::now());

        let updated = with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                let target = chat_sessions::table.find(&key);
                let updated = match &title {
                    Some(title) => diesel::update(target)
                        .set((
                            chat_sessions::title.eq(title),
                            chat_sessions::updated_at.eq(&touched_at),
                        ))
                        .execute(conn)?,
                    None => diesel::update(target)
                        .set(chat_sessions::updated_at.eq(&touched_at))
                        .execute(conn)?,
                };
                if updated == 0 {
                    return Ok(false);
                }
                diesel::insert_into(chat_messages::table)
                    .values(&rows)
                    .execute(conn)?;
                Ok(true)
            })
        })
        .await
        .map_err(database_error)?;

        if updated {
            Ok(())
        } else {
            Err(ChatSessionRepositoryError::NotFound(session_id))
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ChatSessionRepositoryError> {
        let key = id.to_string();
        let deleted = with_connection(&self.pool, move |conn| {
            conn.transaction(|conn| {
                diesel::delete(chat_messages::table.filter(chat_messages::session_id.eq(&key)))
                    .execute(conn)?;
                diesel::delete(chat_sessions::table.find(&key)).execute(conn)
            })
        })
        .await
        .map_err(database_error)?;

        Ok(deleted > 0)
    }
}
