use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::application::services::chat_service::ChatServiceError;
use crate::application::services::quiz_engine::QuizEngineError;
use crate::application::use_cases::recommend_videos::RecommendVideosError;
use crate::application::use_cases::upload_document::UploadDocumentError;
use crate::presentation::http::dto::{ErrorBody, ErrorResponseDto};

/// Error returned by every handler, rendered as
/// `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_INPUT", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }

        let body = ErrorResponseDto {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<UploadDocumentError> for ApiError {
    fn from(error: UploadDocumentError) -> Self {
        let message = error.to_string();
        match error {
            UploadDocumentError::ValidationError(_) => ApiError::bad_request(message),
            UploadDocumentError::ExtractionError(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "EXTRACTION_ERROR", message)
            }
            UploadDocumentError::StorageError(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message)
            }
        }
    }
}

impl From<QuizEngineError> for ApiError {
    fn from(error: QuizEngineError) -> Self {
        let message = error.to_string();
        match error {
            QuizEngineError::NoContent => {
                ApiError::new(StatusCode::BAD_REQUEST, "NO_CONTENT", message)
            }
            QuizEngineError::DocumentNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
            }
            QuizEngineError::InvalidInput(_) => ApiError::bad_request(message),
            QuizEngineError::GatewayUnavailable => {
                ApiError::new(StatusCode::BAD_REQUEST, "GATEWAY_UNAVAILABLE", message)
            }
            QuizEngineError::GatewayError(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_ERROR", message)
            }
            QuizEngineError::MalformedResponse(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "MALFORMED_RESPONSE", message)
            }
            QuizEngineError::StorageError(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message)
            }
        }
    }
}

impl From<ChatServiceError> for ApiError {
    fn from(error: ChatServiceError) -> Self {
        let message = error.to_string();
        match error {
            ChatServiceError::InvalidInput(_) => ApiError::bad_request(message),
            ChatServiceError::NoContent => {
                ApiError::new(StatusCode::BAD_REQUEST, "NO_CONTENT", message)
            }
            ChatServiceError::SessionNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", message)
            }
            ChatServiceError::GatewayUnavailable => {
                ApiError::new(StatusCode::BAD_REQUEST, "GATEWAY_UNAVAILABLE", message)
            }
            ChatServiceError::GatewayError(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_ERROR", message)
            }
            ChatServiceError::StorageError(_) => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", message)
            }
        }
    }
}

impl From<RecommendVideosError> for ApiError {
    fn from(error: RecommendVideosError) -> Self {
        ApiError::bad_request(error.to_string())
    }
}
