use async_trait::async_trait;
use diesel::prelude::*;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};
use crate::infrastructure::database::models::DocumentModel;
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, with_connection};

pub struct SqliteDocumentRepository {
    pool: DbPool,
}

impl SqliteDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn upsert(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let model =
            DocumentModel::try_from(document).map_err(DocumentRepositoryError::ValidationError)?;

        with_connection(&self.pool, move |conn| {
            diesel::replace_into(documents).values(&model).execute(conn)
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_filename(
        &self,
        name: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        let name = name.to_string();
        let result = with_connection(&self.pool, move |conn| {
            documents
                .find(name)
                .select(DocumentModel::as_select())
                .first(conn)
                .optional()
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        result
            .map(Document::try_from)
            .transpose()
            .map_err(DocumentRepositoryError::ValidationError)
    }

    async fn find_all(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let models = with_connection(&self.pool, |conn| {
            documents
                .order(filename.asc())
                .select(DocumentModel::as_select())
                .load(conn)
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(Document::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DocumentRepositoryError::ValidationError)
    }

    async fn list_filenames(&self) -> Result<Vec<String>, DocumentRepositoryError> {
        with_connection(&self.pool, |conn| {
            documents.select(filename).order(filename.asc()).load(conn)
        })
        .await
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
    }
}
