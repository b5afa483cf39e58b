use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::QuizHandler;

pub fn quiz_routes(quiz_handler: Arc<QuizHandler>) -> Router {
    Router::new()
        .route("/generate-quiz", post(QuizHandler::generate_quiz))
        .route("/submit-quiz", post(QuizHandler::submit_quiz))
        .route("/progress", get(QuizHandler::progress))
        .with_state(quiz_handler)
}
