use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SESSION_TITLE: &str = "New Chat";
const TITLE_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        match s {
            "user" => Ok(ChatRole::User),
            "assistant" => Ok(ChatRole::Assistant),
            other => Err(format!("Invalid chat role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
    created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: String) -> Self {
        Self {
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn restore(role: ChatRole, content: String, created_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content,
            created_at,
        }
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A server-owned tutoring conversation. Messages are kept in the order they
/// were appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    id: Uuid,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(title: Option<String>) -> Self {
        let now = Utc::now();
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_TITLE.to_string());

        Self {
            id: Uuid::new_v4(),
            title,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    pub fn restore(
        id: Uuid,
        title: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        messages: Vec<ChatMessage>,
    ) -> Self {
        Self {
            id,
            title,
            created_at,
            updated_at,
            messages,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Title to adopt when `first_message` opens a session that still carries
    /// the default title.
    pub fn title_for_first_message(&self, first_message: &str) -> Option<String> {
        if self.title != DEFAULT_SESSION_TITLE || !self.messages.is_empty() {
            return None;
        }

        let preview: String = first_message.chars().take(TITLE_PREVIEW_CHARS).collect();
        Some(format!("{}...", preview))
    }
}
