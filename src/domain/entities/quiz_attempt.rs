use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Question;

/// One graded quiz submission. Attempts are immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    id: Uuid,
    pdf_name: String,
    questions: Vec<Question>,
    answers: Vec<String>,
    score: i32,
    total: i32,
    timestamp: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn new(
        pdf_name: String,
        questions: Vec<Question>,
        answers: Vec<String>,
        score: i32,
        total: i32,
    ) -> Result<Self, String> {
        Self::validate(&questions, &answers, score, total)?;

        Ok(Self {
            id: Uuid::new_v4(),
            pdf_name,
            questions,
            answers,
            score,
            total,
            timestamp: Utc::now(),
        })
    }

    pub fn restore(
        id: Uuid,
        pdf_name: String,
        questions: Vec<Question>,
        answers: Vec<String>,
        score: i32,
        total: i32,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, String> {
        Self::validate(&questions, &answers, score, total)?;

        Ok(Self {
            id,
            pdf_name,
            questions,
            answers,
            score,
            total,
            timestamp,
        })
    }

    fn validate(
        questions: &[Question],
        answers: &[String],
        score: i32,
        total: i32,
    ) -> Result<(), String> {
        if questions.len() != answers.len() {
            return Err(format!(
                "Answer count {} does not match question count {}",
                answers.len(),
                questions.len()
            ));
        }

        if total as usize != questions.len() {
            return Err(format!(
                "Total {} does not match question count {}",
                total,
                questions.len()
            ));
        }

        if score < 0 || score > total {
            return Err(format!("Score {} is outside 0..={}", score, total));
        }

        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn pdf_name(&self) -> &str {
        &self.pdf_name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total)
    }
}
