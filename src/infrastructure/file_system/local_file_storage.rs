use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Stores uploads as `<base_path>/<file_name>`.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    fn get_file_path(&self, file_name: &str) -> Result<PathBuf, FileStorageError> {
        let is_plain_name = !file_name.is_empty()
            && file_name != "."
            && file_name != ".."
            && !file_name.contains(['/', '\\']);

        if !is_plain_name {
            return Err(FileStorageError::InvalidPath(file_name.to_string()));
        }

        Ok(self.base_path.join(file_name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        data: &[u8],
        file_name: &str,
    ) -> Result<StoredFile, FileStorageError> {
        let file_path = self.get_file_path(file_name)?;
        self.ensure_directory_exists().await?;

        fs::write(&file_path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(StoredFile {
            file_name: file_name.to_string(),
            path: file_path.to_string_lossy().to_string(),
            size: data.len() as u64,
        })
    }

    async fn delete_file(&self, file_name: &str) -> Result<bool, FileStorageError> {
        let file_path = self.get_file_path(file_name)?;

        if !file_path.exists() {
            return Ok(false);
        }

        fs::remove_file(&file_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(true)
    }
}
