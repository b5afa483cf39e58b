use axum::{
    Json,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    CreateChatSessionUseCase, DeleteChatSessionUseCase, GetChatSessionUseCase,
    ListChatSessionsUseCase, SendChatMessageUseCase, chat_sessions::CreateChatSessionRequest,
};
use crate::presentation::http::dto::{
    ChatRequestDto, ChatResponseDto, ChatSessionDto, ChatSessionSummaryDto,
    CreateSessionRequestDto,
};
use crate::presentation::http::errors::ApiError;

pub struct ChatHandler {
    send_message_use_case: Arc<SendChatMessageUseCase>,
    create_session_use_case: Arc<CreateChatSessionUseCase>,
    get_session_use_case: Arc<GetChatSessionUseCase>,
    list_sessions_use_case: Arc<ListChatSessionsUseCase>,
    delete_session_use_case: Arc<DeleteChatSessionUseCase>,
}

impl ChatHandler {
    pub fn new(
        send_message_use_case: Arc<SendChatMessageUseCase>,
        create_session_use_case: Arc<CreateChatSessionUseCase>,
        get_session_use_case: Arc<GetChatSessionUseCase>,
        list_sessions_use_case: Arc<ListChatSessionsUseCase>,
        delete_session_use_case: Arc<DeleteChatSessionUseCase>,
    ) -> Self {
        Self {
            send_message_use_case,
            create_session_use_case,
            get_session_use_case,
            list_sessions_use_case,
            delete_session_use_case,
        }
    }

    pub async fn chat(
        State(handler): State<Arc<ChatHandler>>,
        payload: Result<Json<ChatRequestDto>, JsonRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let Json(request) = payload?;
        let response = handler.send_message_use_case.execute(request.into()).await?;

        Ok(Json(ChatResponseDto::from(response)))
    }

    /// An empty body creates an untitled session.
    pub async fn create_session(
        State(handler): State<Arc<ChatHandler>>,
        body: Bytes,
    ) -> Result<impl IntoResponse, ApiError> {
        let request: CreateSessionRequestDto = if body.iter().all(u8::is_ascii_whitespace) {
            CreateSessionRequestDto::default()
        } else {
            serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(e.to_string()))?
        };
        let session = handler
            .create_session_use_case
            .execute(CreateChatSessionRequest {
                title: request.title,
            })
            .await?;

        Ok((StatusCode::CREATED, Json(ChatSessionDto::from(session))))
    }

    pub async fn list_sessions(
        State(handler): State<Arc<ChatHandler>>,
    ) -> Result<impl IntoResponse, ApiError> {
        let sessions = handler.list_sessions_use_case.execute().await?;
        let summaries: Vec<ChatSessionSummaryDto> =
            sessions.into_iter().map(ChatSessionSummaryDto::from).collect();

        Ok(Json(summaries))
    }

    pub async fn get_session(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        let session = handler.get_session_use_case.execute(session_id).await?;
        Ok(Json(ChatSessionDto::from(session)))
    }

    pub async fn delete_session(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, ApiError> {
        handler.delete_session_use_case.execute(session_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
