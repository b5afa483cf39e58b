use std::sync::Arc;

use uuid::Uuid;

use crate::application::ports::CompletionProvider;
use crate::application::ports::completion_provider::{
    CompletionProviderError, CompletionRequest, ConversationTurn,
};
use crate::application::services::document_store::{DocumentStore, DocumentStoreError};
use crate::application::services::prompt_builder::{PromptBuilder, PromptError};
use crate::domain::entities::{ChatMessage, ChatRole, ChatSession};
use crate::domain::repositories::ChatSessionRepository;
use crate::domain::repositories::chat_session_repository::ChatSessionRepositoryError;
use crate::domain::value_objects::DocumentSelector;

#[derive(Debug)]
pub enum ChatServiceError {
    InvalidInput(String),
    NoContent,
    SessionNotFound(Uuid),
    GatewayUnavailable,
    GatewayError(String),
    StorageError(String),
}

impl std::fmt::Display for ChatServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatServiceError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ChatServiceError::NoContent => write!(
                f,
                "The selected document has no extractable text, upload a text-based PDF"
            ),
            ChatServiceError::SessionNotFound(id) => write!(f, "Chat session not found: {}", id),
            ChatServiceError::GatewayUnavailable => write!(
                f,
                "Completion provider is not configured, set OPENAI_API_KEY"
            ),
            ChatServiceError::GatewayError(msg) => write!(f, "Completion provider error: {}", msg),
            ChatServiceError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for ChatServiceError {}

impl From<ChatSessionRepositoryError> for ChatServiceError {
    fn from(error: ChatSessionRepositoryError) -> Self {
        match error {
            ChatSessionRepositoryError::NotFound(id) => ChatServiceError::SessionNotFound(id),
            other => ChatServiceError::StorageError(other.to_string()),
        }
    }
}

impl From<CompletionProviderError> for ChatServiceError {
    fn from(error: CompletionProviderError) -> Self {
        match error {
            CompletionProviderError::NotConfigured => ChatServiceError::GatewayUnavailable,
            other => ChatServiceError::GatewayError(other.to_string()),
        }
    }
}

impl From<PromptError> for ChatServiceError {
    fn from(error: PromptError) -> Self {
        match error {
            PromptError::NoContent => ChatServiceError::NoContent,
        }
    }
}

/// The AI tutor. Each turn is answered from the selected document's text; when
/// a session id is supplied the turn also sees, and is appended to, that
/// session's history.
pub struct ChatService {
    document_store: Arc<DocumentStore>,
    prompt_builder: PromptBuilder,
    completion_provider: Arc<dyn CompletionProvider>,
    session_repository: Arc<dyn ChatSessionRepository>,
}

impl ChatService {
    pub fn new(
        document_store: Arc<DocumentStore>,
        prompt_builder: PromptBuilder,
        completion_provider: Arc<dyn CompletionProvider>,
        session_repository: Arc<dyn ChatSessionRepository>,
    ) -> Self {
        Self {
            document_store,
            prompt_builder,
            completion_provider,
            session_repository,
        }
    }

    pub async fn reply(
        &self,
        message: &str,
        selector: Option<&DocumentSelector>,
        session_id: Option<Uuid>,
    ) -> Result<String, ChatServiceError> {
        if message.trim().is_empty() {
            return Err(ChatServiceError::InvalidInput(
                "Message cannot be empty".to_string(),
            ));
        }

        if !self.completion_provider.is_configured() {
            return Err(ChatServiceError::GatewayUnavailable);
        }

        let session = match session_id {
            Some(id) => Some(self.get_session(id).await?),
            None => None,
        };

        let context = self.grounding_context(selector).await?;
        let prompt = self
            .prompt_builder
            .build_chat_prompt(context.as_deref(), message)?;

        let history = session
            .as_ref()
            .map(|s| {
                s.messages()
                    .iter()
                    .map(|m| ConversationTurn {
                        role: m.role(),
                        content: m.content().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let reply = self
            .completion_provider
            .complete(CompletionRequest {
                system_prompt: prompt.system_prompt,
                history,
                user_prompt: prompt.user_prompt,
                response_format: prompt.response_format,
            })
            .await?;

        if let Some(session) = session {
            self.record_exchange(&session, message, &reply).await?;
        }

        Ok(reply)
    }

    /// Document text for the selector, or `None` when the tutor should answer
    /// without grounding.
    async fn grounding_context(
        &self,
        selector: Option<&DocumentSelector>,
    ) -> Result<Option<String>, ChatServiceError> {
        let Some(selector) = selector else {
            return Ok(None);
        };

        match self.document_store.resolve_content(selector).await {
            Ok(content) if *selector == DocumentSelector::All && content.trim().is_empty() => {
                Ok(None)
            }
            Ok(content) => Ok(Some(content)),
            Err(DocumentStoreError::NotFound(name)) => {
                tracing::debug!("Chat requested unknown document {}, answering ungrounded", name);
                Ok(None)
            }
            Err(e) => Err(ChatServiceError::StorageError(e.to_string())),
        }
    }

    async fn record_exchange(
        &self,
        session: &ChatSession,
        message: &str,
        reply: &str,
    ) -> Result<(), ChatServiceError> {
        let title = session.title_for_first_message(message);

        self.session_repository
            .append_exchange(
                session.id(),
                title.as_deref(),
                &ChatMessage::new(ChatRole::User, message.to_string()),
                &ChatMessage::new(ChatRole::Assistant, reply.to_string()),
            )
            .await?;

        Ok(())
    }

    pub async fn create_session(
        &self,
        title: Option<String>,
    ) -> Result<ChatSession, ChatServiceError> {
        let session = ChatSession::new(title);
        self.session_repository.create(&session).await?;
        tracing::info!("Created chat session {}", session.id());
        Ok(session)
    }

    pub async fn get_session(&self, id: Uuid) -> Result<ChatSession, ChatServiceError> {
        self.session_repository
            .find_by_id(id)
            .await?
            .ok_or(ChatServiceError::SessionNotFound(id))
    }

    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, ChatServiceError> {
        Ok(self.session_repository.list().await?)
    }

    pub async fn delete_session(&self, id: Uuid) -> Result<(), ChatServiceError> {
        if self.session_repository.delete(id).await? {
            tracing::info!("Deleted chat session {}", id);
            Ok(())
        } else {
            Err(ChatServiceError::SessionNotFound(id))
        }
    }
}
