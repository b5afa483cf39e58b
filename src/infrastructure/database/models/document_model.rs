use diesel::prelude::*;

use crate::domain::entities::Document;
use crate::domain::value_objects::FileHash;
use crate::infrastructure::database::models::{decode_timestamp, encode_timestamp};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentModel {
    pub filename: String,
    pub content: String,
    /// JSON array of chunk strings.
    pub chunks: String,
    pub file_hash: String,
    pub file_size: i64,
    pub created_at: String,
}

impl TryFrom<&Document> for DocumentModel {
    type Error = String;

    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        let chunks = serde_json::to_string(document.chunks())
            .map_err(|e| format!("Failed to encode chunks: {}", e))?;

        Ok(Self {
            filename: document.filename().to_string(),
            content: document.content().to_string(),
            chunks,
            file_hash: document.file_hash().as_str().to_string(),
            file_size: document.file_size(),
            created_at: encode_timestamp(document.created_at()),
        })
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let chunks: Vec<String> = serde_json::from_str(&model.chunks)
            .map_err(|e| format!("Invalid chunks for {}: {}", model.filename, e))?;
        let file_hash =
            FileHash::new(model.file_hash).map_err(|e| format!("Invalid file hash: {}", e))?;

        Ok(Document::restore(
            model.filename,
            model.content,
            chunks,
            file_hash,
            model.file_size,
            decode_timestamp(&model.created_at)?,
        ))
    }
}
