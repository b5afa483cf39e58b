use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::application::ports::CompletionProvider;
use crate::application::ports::completion_provider::{CompletionProviderError, CompletionRequest};
use crate::application::services::document_store::{DocumentStore, DocumentStoreError};
use crate::application::services::prompt_builder::{PromptBuilder, PromptError};
use crate::domain::entities::{Question, QuestionType, QuizAttempt};
use crate::domain::repositories::AttemptRepository;
use crate::domain::value_objects::DocumentSelector;

pub const MAX_QUESTION_COUNT: u32 = 20;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[A-Za-z]*\s*\n(.*?)\n?\s*```$").expect("code fence pattern is valid")
});

#[derive(Debug)]
pub enum QuizEngineError {
    NoContent,
    DocumentNotFound(String),
    InvalidInput(String),
    GatewayUnavailable,
    GatewayError(String),
    MalformedResponse(String),
    StorageError(String),
}

impl std::fmt::Display for QuizEngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizEngineError::NoContent => write!(
                f,
                "No document content available, upload a PDF with extractable text first"
            ),
            QuizEngineError::DocumentNotFound(name) => write!(f, "Document not found: {}", name),
            QuizEngineError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            QuizEngineError::GatewayUnavailable => write!(
                f,
                "Completion provider is not configured, set OPENAI_API_KEY"
            ),
            QuizEngineError::GatewayError(msg) => write!(f, "Completion provider error: {}", msg),
            QuizEngineError::MalformedResponse(msg) => {
                write!(f, "Malformed quiz response: {}", msg)
            }
            QuizEngineError::StorageError(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for QuizEngineError {}

impl From<DocumentStoreError> for QuizEngineError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::NotFound(name) => QuizEngineError::DocumentNotFound(name),
            DocumentStoreError::ExtractionError(msg) | DocumentStoreError::StorageError(msg) => {
                QuizEngineError::StorageError(msg)
            }
        }
    }
}

impl From<PromptError> for QuizEngineError {
    fn from(error: PromptError) -> Self {
        match error {
            PromptError::NoContent => QuizEngineError::NoContent,
        }
    }
}

impl From<CompletionProviderError> for QuizEngineError {
    fn from(error: CompletionProviderError) -> Self {
        match error {
            CompletionProviderError::NotConfigured => QuizEngineError::GatewayUnavailable,
            other => QuizEngineError::GatewayError(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuizPayload {
    questions: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuestion {
    question: String,
    options: Option<Vec<String>>,
    correct_answer: String,
    explanation: String,
}

impl From<RawQuestion> for Question {
    fn from(raw: RawQuestion) -> Self {
        Self {
            question: raw.question,
            options: raw.options,
            correct_answer: raw.correct_answer,
            explanation: raw.explanation,
        }
    }
}

/// Generates quizzes through the completion provider, grades submissions and
/// records attempts in the ledger.
pub struct QuizEngine {
    document_store: Arc<DocumentStore>,
    prompt_builder: PromptBuilder,
    completion_provider: Arc<dyn CompletionProvider>,
    attempt_repository: Arc<dyn AttemptRepository>,
}

impl QuizEngine {
    pub fn new(
        document_store: Arc<DocumentStore>,
        prompt_builder: PromptBuilder,
        completion_provider: Arc<dyn CompletionProvider>,
        attempt_repository: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            document_store,
            prompt_builder,
            completion_provider,
            attempt_repository,
        }
    }

    pub async fn generate(
        &self,
        selector: &DocumentSelector,
        question_type: QuestionType,
        count: u32,
    ) -> Result<Vec<Question>, QuizEngineError> {
        if count == 0 || count > MAX_QUESTION_COUNT {
            return Err(QuizEngineError::InvalidInput(format!(
                "Question count must be between 1 and {}, got {}",
                MAX_QUESTION_COUNT, count
            )));
        }

        if !self.completion_provider.is_configured() {
            return Err(QuizEngineError::GatewayUnavailable);
        }

        let content = self.document_store.resolve_content(selector).await?;
        let prompt = self
            .prompt_builder
            .build_quiz_prompt(&content, question_type, count)?;

        tracing::info!(
            "Generating {} {} question(s) from {} with {}",
            count,
            question_type,
            selector,
            self.completion_provider.model_name()
        );

        let raw = self
            .completion_provider
            .complete(CompletionRequest {
                system_prompt: prompt.system_prompt,
                history: Vec::new(),
                user_prompt: prompt.user_prompt,
                response_format: prompt.response_format,
            })
            .await?;

        let questions = parse_questions(&raw, question_type).inspect_err(|e| {
            tracing::warn!("Rejected quiz response for {}: {}", selector, e);
        })?;

        if questions.len() != count as usize {
            tracing::warn!(
                "Requested {} questions from {} but the model returned {}",
                count,
                selector,
                questions.len()
            );
        }

        Ok(questions)
    }

    /// Counts answers that equal the question's `correct_answer` exactly.
    /// No trimming or case folding is applied.
    pub fn grade(questions: &[Question], answers: &[String]) -> Result<(i32, i32), QuizEngineError> {
        if questions.len() != answers.len() {
            return Err(QuizEngineError::InvalidInput(format!(
                "Expected {} answers, got {}",
                questions.len(),
                answers.len()
            )));
        }

        let score = questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.is_correct(answer))
            .count();

        Ok((score as i32, questions.len() as i32))
    }

    pub async fn record_attempt(
        &self,
        selector: &DocumentSelector,
        questions: Vec<Question>,
        answers: Vec<String>,
        score: i32,
        total: i32,
    ) -> Result<Uuid, QuizEngineError> {
        let attempt = QuizAttempt::new(selector.to_string(), questions, answers, score, total)
            .map_err(QuizEngineError::InvalidInput)?;

        self.attempt_repository
            .append(&attempt)
            .await
            .map_err(|e| QuizEngineError::StorageError(e.to_string()))?;

        tracing::info!(
            "Recorded attempt {} for {}: {}/{}",
            attempt.id(),
            attempt.pdf_name(),
            score,
            total
        );

        Ok(attempt.id())
    }
}

/// Strictly validates a model response against the quiz JSON contract.
pub fn parse_questions(
    raw: &str,
    question_type: QuestionType,
) -> Result<Vec<Question>, QuizEngineError> {
    let trimmed = raw.trim();
    let body = CODE_FENCE
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map_or(trimmed, |m| m.as_str());

    let payload: QuizPayload = serde_json::from_str(body)
        .map_err(|e| QuizEngineError::MalformedResponse(e.to_string()))?;

    if payload.questions.is_empty() {
        return Err(QuizEngineError::MalformedResponse(
            "response contains no questions".to_string(),
        ));
    }

    for (index, question) in payload.questions.iter().enumerate() {
        match (&question.options, question_type.requires_options()) {
            (None, true) => {
                return Err(QuizEngineError::MalformedResponse(format!(
                    "question {} is missing options for {}",
                    index, question_type
                )));
            }
            (Some(options), true) if options.is_empty() => {
                return Err(QuizEngineError::MalformedResponse(format!(
                    "question {} has an empty options list",
                    index
                )));
            }
            (Some(_), false) => {
                return Err(QuizEngineError::MalformedResponse(format!(
                    "question {} has options but {} questions take none",
                    index, question_type
                )));
            }
            _ => {}
        }
    }

    Ok(payload.questions.into_iter().map(Question::from).collect())
}
