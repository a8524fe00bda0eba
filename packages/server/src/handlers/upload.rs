use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::upload::UploadResponse;
use crate::state::AppState;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    // Leave headroom for the multipart framing around the file itself.
    DefaultBodyLimit::max(max_upload_size as usize + 64 * 1024)
}

#[utoipa::path(
    post,
    path = "/file",
    tag = "Upload",
    operation_id = "uploadFile",
    summary = "Upload a media file",
    description = "Stores the `file` multipart field under a generated unique name \
        preserving the original extension. The returned `url` is served statically.",
    request_body(content_type = "multipart/form-data", description = "File upload"),
    responses(
        (status = 201, description = "File stored", body = UploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut stored = None;
    let mut original_name = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue; // Ignore unknown fields.
        }

        let name = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;

        let mut data = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            data.extend_from_slice(&chunk);
        }

        stored = Some(state.media.save(&name, &data).await?);
        original_name = Some(name);
    }

    let (stored, original_name) = stored
        .zip(original_name)
        .ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let prefix = state.config.storage.public_prefix.trim_end_matches('/');
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: format!("{prefix}/{}", stored.filename),
            original_name,
        }),
    ))
}
