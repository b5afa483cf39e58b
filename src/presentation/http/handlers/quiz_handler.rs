use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    GenerateQuizUseCase, GetProgressUseCase, SubmitQuizUseCase, get_progress::GetProgressRequest,
};
use crate::presentation::http::dto::{
    AttemptDto, GenerateQuizRequestDto, GenerateQuizResponseDto, ProgressQueryDto,
    SubmitQuizRequestDto, SubmitQuizResponseDto,
};
use crate::presentation::http::errors::ApiError;

pub struct QuizHandler {
    generate_quiz_use_case: Arc<GenerateQuizUseCase>,
    submit_quiz_use_case: Arc<SubmitQuizUseCase>,
    get_progress_use_case: Arc<GetProgressUseCase>,
}

impl QuizHandler {
    pub fn new(
        generate_quiz_use_case: Arc<GenerateQuizUseCase>,
        submit_quiz_use_case: Arc<SubmitQuizUseCase>,
        get_progress_use_case: Arc<GetProgressUseCase>,
    ) -> Self {
        Self {
            generate_quiz_use_case,
            submit_quiz_use_case,
            get_progress_use_case,
        }
    }

    pub async fn generate_quiz(
        State(handler): State<Arc<QuizHandler>>,
        payload: Result<Json<GenerateQuizRequestDto>, JsonRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let Json(request) = payload?;
        let response = handler
            .generate_quiz_use_case
            .execute(request.into())
            .await?;

        Ok(Json(GenerateQuizResponseDto {
            questions: response.questions,
        }))
    }

    pub async fn submit_quiz(
        State(handler): State<Arc<QuizHandler>>,
        payload: Result<Json<SubmitQuizRequestDto>, JsonRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let Json(request) = payload?;
        let response = handler.submit_quiz_use_case.execute(request.into()).await?;

        Ok(Json(SubmitQuizResponseDto::from(response)))
    }

    pub async fn progress(
        State(handler): State<Arc<QuizHandler>>,
        query: Result<Query<ProgressQueryDto>, QueryRejection>,
    ) -> Result<impl IntoResponse, ApiError> {
        let Query(query) = query?;
        let response = handler
            .get_progress_use_case
            .execute(GetProgressRequest { limit: query.limit })
            .await;

        let attempts: Vec<AttemptDto> = response.attempts.into_iter().map(AttemptDto::from).collect();
        Ok(Json(attempts))
    }
}
