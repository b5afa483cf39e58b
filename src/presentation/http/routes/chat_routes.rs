use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/chat", post(ChatHandler::chat))
        .route(
            "/chat/sessions",
            get(ChatHandler::list_sessions).post(ChatHandler::create_session),
        )
        .route(
            "/chat/sessions/{session_id}",
            get(ChatHandler::get_session).delete(ChatHandler::delete_session),
        )
        .with_state(chat_handler)
}
