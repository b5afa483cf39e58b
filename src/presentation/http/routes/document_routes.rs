use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/pdfs", get(DocumentHandler::list))
        .route("/upload", post(DocumentHandler::upload))
        .with_state(document_handler)
}
