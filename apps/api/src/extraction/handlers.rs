use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::models::ResumeProfile;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/v1/resumes/parse
///
/// Accepts a multipart upload with a `file` part (.pdf or .docx) and returns
/// the extracted profile. Decoding runs on the blocking pool.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    let limit = state.config.max_upload_bytes;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("the file part must carry a filename".to_string()))?;
        let bytes: Bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        debug!("Received '{}' ({} bytes)", filename, bytes.len());

        let parser = state.parser.clone();
        let profile = tokio::task::spawn_blocking(move || parser.parse_bytes(&bytes, &filename))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Resume parsing task failed: {e}")))??;

        return Ok(Json(profile));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(limit)
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}
