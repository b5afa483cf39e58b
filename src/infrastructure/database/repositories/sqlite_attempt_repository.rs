use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::QuizAttempt;
use crate::domain::repositories::{AttemptRepository, attempt_repository::AttemptRepositoryError};
use crate::infrastructure::database::models::{AttemptModel, NewAttemptModel};
use crate::infrastructure::database::schema::quiz_attempts::dsl::*;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct SqliteAttemptRepository {
    pool: DbPool,
}

impl SqliteAttemptRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptRepository for SqliteAttemptRepository {
    async fn append(&self, attempt: &QuizAttempt) -> Result<(), AttemptRepositoryError> {
        let model =
            NewAttemptModel::try_from(attempt).map_err(AttemptRepositoryError::ValidationError)?;

        with_connection(&self.pool, move |conn| {
            diesel::insert_into(quiz_attempts).values(&model).execute(conn)
        })
        .await
        .map_err(|e| AttemptRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<QuizAttempt>, AttemptRepositoryError> {
        let models = with_connection(&self.pool, move |conn| {
            quiz_attempts
                .order((timestamp.desc(), seq.desc()))
                .limit(limit.max(0))
                .select(AttemptModel::as_select())
                .load(conn)
        })
        .await
        .map_err(|e| AttemptRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(QuizAttempt::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(AttemptRepositoryError::ValidationError)
    }
}
