use std::sync::Arc;

use crate::application::services::QuizEngine;
use crate::application::services::quiz_engine::QuizEngineError;
use crate::domain::entities::{Question, QuestionType};
use crate::domain::value_objects::DocumentSelector;

pub const DEFAULT_QUESTION_COUNT: u32 = 5;

#[derive(Debug, Clone)]
pub struct GenerateQuizRequest {
    /// Document name or `all`; missing means every document.
    pub pdf_name: Option<String>,
    /// `MCQ`, `SAQ` or `LAQ`; missing means `MCQ`.
    pub question_type: Option<String>,
    pub count: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GenerateQuizResponse {
    pub questions: Vec<Question>,
}

pub struct GenerateQuizUseCase {
    quiz_engine: Arc<QuizEngine>,
}

impl GenerateQuizUseCase {
    pub fn new(quiz_engine: Arc<QuizEngine>) -> Self {
        Self { quiz_engine }
    }

    pub async fn execute(
        &self,
        request: GenerateQuizRequest,
    ) -> Result<GenerateQuizResponse, QuizEngineError> {
        let selector = DocumentSelector::parse_optional(request.pdf_name.as_deref())
            .unwrap_or(DocumentSelector::All);

        let question_type = match request.question_type.as_deref() {
            Some(code) => QuestionType::from_code(code).map_err(QuizEngineError::InvalidInput)?,
            None => QuestionType::MultipleChoice,
        };

        let count = request.count.unwrap_or(DEFAULT_QUESTION_COUNT);

        let questions = self
            .quiz_engine
            .generate(&selector, question_type, count)
            .await?;

        Ok(GenerateQuizResponse { questions })
    }
}
