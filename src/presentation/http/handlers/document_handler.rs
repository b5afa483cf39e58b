use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    ListDocumentsUseCase, UploadDocumentUseCase, upload_document::UploadDocumentRequest,
};
use crate::presentation::http::dto::UploadResponseDto;
use crate::presentation::http::errors::ApiError;

/// Multipart field that carries the uploaded PDF.
pub const UPLOAD_FIELD: &str = "pdf";

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    list_documents_use_case: Arc<ListDocumentsUseCase>,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        list_documents_use_case: Arc<ListDocumentsUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            list_documents_use_case,
        }
    }

    pub async fn upload(
        State(handler): State<Arc<DocumentHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, ApiError> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let file_name = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| ApiError::bad_request("The pdf field has no file name"))?;

            let file_data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.body_text()))?
                .to_vec();

            tracing::info!("Upload of {} ({} bytes)", file_name, file_data.len());

            let response = handler
                .upload_use_case
                .execute(UploadDocumentRequest {
                    file_name,
                    file_data,
                })
                .await?;

            return Ok((StatusCode::OK, Json(UploadResponseDto::from(response))));
        }

        Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "NO_FILE_PROVIDED",
            "No file provided in the pdf field",
        ))
    }

    pub async fn list(State(handler): State<Arc<DocumentHandler>>) -> impl IntoResponse {
        let response = handler.list_documents_use_case.execute().await;
        Json(response.filenames)
    }
}
