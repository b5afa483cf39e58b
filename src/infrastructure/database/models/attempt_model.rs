use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Question, QuizAttempt};
use crate::infrastructure::database::models::{decode_timestamp, encode_timestamp};
use crate::infrastructure::database::schema::quiz_attempts;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = quiz_attempts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AttemptModel {
    pub seq: i32,
    pub id: String,
    pub pdf_name: String,
    pub questions: String,
    pub answers: String,
    pub score: i32,
    pub total: i32,
    pub timestamp: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = quiz_attempts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewAttemptModel {
    pub id: String,
    pub pdf_name: String,
    pub questions: String,
    pub answers: String,
    pub score: i32,
    pub total: i32,
    pub timestamp: String,
}

impl TryFrom<&QuizAttempt> for NewAttemptModel {
    type Error = String;

    fn try_from(attempt: &QuizAttempt) -> Result<Self, Self::Error> {
        Ok(Self {
            id: attempt.id().to_string(),
            pdf_name: attempt.pdf_name().to_string(),
            questions: serde_json::to_string(attempt.questions())
                .map_err(|e| format!("Failed to encode questions: {}", e))?,
            answers: serde_json::to_string(attempt.answers())
                .map_err(|e| format!("Failed to encode answers: {}", e))?,
            score: attempt.score(),
            total: attempt.total(),
            timestamp: encode_timestamp(attempt.timestamp()),
        })
    }
}

impl TryFrom<AttemptModel> for QuizAttempt {
    type Error = String;

    fn try_from(model: AttemptModel) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|e| format!("Invalid attempt id: {}", e))?;
        let questions: Vec<Question> = serde_json::from_str(&model.questions)
            .map_err(|e| format!("Invalid questions for attempt {}: {}", id, e))?;
        let answers: Vec<String> = serde_json::from_str(&model.answers)
            .map_err(|e| format!("Invalid answers for attempt {}: {}", id, e))?;

        QuizAttempt::restore(
            id,
            model.pdf_name,
            questions,
            answers,
            model.score,
            model.total,
            decode_timestamp(&model.timestamp)?,
        )
    }
}
