use axum::{Json, Router, response::IntoResponse, routing::get};

use crate::presentation::http::dto::{HealthResponseDto, PingResponseDto};

pub fn health_routes() -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
}

async fn ping_handler() -> impl IntoResponse {
    Json(PingResponseDto { ok: true })
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponseDto {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
