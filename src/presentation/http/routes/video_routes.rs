use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::VideoHandler;

pub fn video_routes(video_handler: Arc<VideoHandler>) -> Router {
    Router::new()
        .route("/youtube-recommendations", get(VideoHandler::recommendations))
        .with_state(video_handler)
}
