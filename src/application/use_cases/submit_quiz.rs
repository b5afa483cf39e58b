use std::sync::Arc;

use uuid::Uuid;

use crate::application::services::QuizEngine;
use crate::application::services::quiz_engine::QuizEngineError;
use crate::domain::entities::Question;
use crate::domain::value_objects::DocumentSelector;

#[derive(Debug, Clone)]
pub struct SubmitQuizRequest {
    pub pdf_name: Option<String>,
    pub questions: Vec<Question>,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SubmitQuizResponse {
    pub score: i32,
    pub total: i32,
    pub attempt_id: Uuid,
}

/// Grades a submission and appends it to the attempt ledger.
pub struct SubmitQuizUseCase {
    quiz_engine: Arc<QuizEngine>,
}

impl SubmitQuizUseCase {
    pub fn new(quiz_engine: Arc<QuizEngine>) -> Self {
        Self { quiz_engine }
    }

    pub async fn execute(
        &self,
        request: SubmitQuizRequest,
    ) -> Result<SubmitQuizResponse, QuizEngineError> {
        if request.questions.is_empty() {
            return Err(QuizEngineError::InvalidInput(
                "A quiz needs at least one question".to_string(),
            ));
        }

        let selector = DocumentSelector::parse_optional(request.pdf_name.as_deref())
            .unwrap_or(DocumentSelector::All);

        let (score, total) = QuizEngine::grade(&request.questions, &request.answers)?;
        let attempt_id = self
            .quiz_engine
            .record_attempt(&selector, request.questions, request.answers, score, total)
            .await?;

        Ok(SubmitQuizResponse {
            score,
            total,
            attempt_id,
        })
    }
}
