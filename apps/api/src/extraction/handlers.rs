use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{extract_upload, supported_formats, DocumentUpload, ParsedDocument, SupportedFormats};
use crate::state::AppState;

/// Fields accepted by the upload endpoints.
#[derive(Debug)]
pub struct UploadForm {
    pub upload: DocumentUpload,
    pub job_description: Option<String>,
}

/// Reads the `file` part and the optional `job_description` part of a multipart body.
/// Unknown parts are skipped.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut upload: Option<DocumentUpload> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let media_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file part: {e}")))?;
                debug!(
                    "Received file {:?} ({:?}, {} bytes)",
                    file_name,
                    media_type,
                    bytes.len()
                );
                upload = Some(DocumentUpload {
                    bytes,
                    media_type,
                    file_name,
                });
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
                if !text.trim().is_empty() {
                    job_description = Some(text);
                }
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    Ok(UploadForm {
        upload,
        job_description,
    })
}

/// GET /api/v1/documents/supported-formats
pub async fn handle_supported_formats(State(state): State<AppState>) -> Json<SupportedFormats> {
    Json(supported_formats(state.config.max_upload_bytes))
}

/// POST /api/v1/documents/parse
pub async fn handle_parse_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParsedDocument>, AppError> {
    let form = read_upload_form(multipart).await?;
    let document = extract_upload(&form.upload, state.config.max_upload_bytes).await?;
    Ok(Json(document))
}
