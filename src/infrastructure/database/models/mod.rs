pub mod attempt_model;
pub mod chat_session_model;
pub mod document_model;

pub use attempt_model::{AttemptModel, NewAttemptModel};
pub use chat_session_model::{ChatMessageModel, ChatSessionModel, NewChatMessageModel};
pub use document_model::DocumentModel;

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamps are stored as fixed-width RFC 3339 text so that string order
/// matches time order.
pub fn encode_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp {:?}: {}", value, e))
}
