use chrono::{DateTime, Utc};

use crate::domain::value_objects::FileHash;

/// An uploaded coursebook: its extracted text and the fixed-size chunks cut from it.
///
/// Documents are keyed by their original upload name. A second upload under the
/// same name replaces the record wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    filename: String,
    content: String,
    chunks: Vec<String>,
    file_hash: FileHash,
    file_size: i64,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        filename: String,
        content: String,
        chunks: Vec<String>,
        file_hash: FileHash,
        file_size: i64,
    ) -> Self {
        Self {
            filename,
            content,
            chunks,
            file_hash,
            file_size,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        filename: String,
        content: String,
        chunks: Vec<String>,
        file_hash: FileHash,
        file_size: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            filename,
            content,
            chunks,
            file_hash,
            file_size,
            created_at,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn file_hash(&self) -> &FileHash {
        &self.file_hash
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
