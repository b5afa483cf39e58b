use serde::Serialize;

use crate::application::use_cases::upload_document::UploadDocumentResponse;

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub filename: String,
    pub success: bool,
    pub chunks: usize,
    pub file_size: i64,
    pub file_hash: String,
}

impl From<UploadDocumentResponse> for UploadResponseDto {
    fn from(response: UploadDocumentResponse) -> Self {
        Self {
            filename: response.filename,
            success: true,
            chunks: response.chunks,
            file_size: response.file_size,
            file_hash: response.file_hash,
        }
    }
}
