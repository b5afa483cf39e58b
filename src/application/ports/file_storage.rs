use async_trait::async_trait;

#[derive(Debug)]
pub enum FileStorageError {
    InvalidPath(String),
    IoError(String),
}

impl std::fmt::Display for FileStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileStorageError::InvalidPath(name) => write!(f, "Invalid path: {}", name),
            FileStorageError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for FileStorageError {}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub path: String,
    pub size: u64,
}

/// Raw upload storage addressed by file name.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `data` under `file_name`, replacing an existing file of that name.
    async fn store_file(&self, data: &[u8], file_name: &str)
    -> Result<StoredFile, FileStorageError>;

    async fn delete_file(&self, file_name: &str) -> Result<bool, FileStorageError>;
}
