use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::generate_quiz::GenerateQuizRequest;
use crate::application::use_cases::submit_quiz::{SubmitQuizRequest, SubmitQuizResponse};
use crate::domain::entities::{Question, QuizAttempt};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequestDto {
    pub pdf_name: Option<String>,
    pub question_type: Option<String>,
    pub count: Option<u32>,
}

impl From<GenerateQuizRequestDto> for GenerateQuizRequest {
    fn from(dto: GenerateQuizRequestDto) -> Self {
        Self {
            pdf_name: dto.pdf_name,
            question_type: dto.question_type,
            count: dto.count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponseDto {
    pub questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequestDto {
    pub pdf_name: Option<String>,
    pub questions: Vec<Question>,
    pub answers: Vec<String>,
}

impl From<SubmitQuizRequestDto> for SubmitQuizRequest {
    fn from(dto: SubmitQuizRequestDto) -> Self {
        Self {
            pdf_name: dto.pdf_name,
            questions: dto.questions,
            answers: dto.answers,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizResponseDto {
    pub score: i32,
    pub total: i32,
    pub attempt_id: Uuid,
}

impl From<SubmitQuizResponse> for SubmitQuizResponseDto {
    fn from(response: SubmitQuizResponse) -> Self {
        Self {
            score: response.score,
            total: response.total,
            attempt_id: response.attempt_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressQueryDto {
    pub limit: Option<i64>,
}

/// One row of the progress history.
#[derive(Debug, Serialize)]
pub struct AttemptDto {
    pub id: Uuid,
    pub pdf_name: String,
    pub score: i32,
    pub total: i32,
    pub percentage: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<QuizAttempt> for AttemptDto {
    fn from(attempt: QuizAttempt) -> Self {
        Self {
            id: attempt.id(),
            pdf_name: attempt.pdf_name().to_string(),
            score: attempt.score(),
            total: attempt.total(),
            percentage: attempt.percentage(),
            timestamp: attempt.timestamp(),
        }
    }
}
