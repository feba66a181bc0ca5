use axum::{
    Json,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::file::{FileDeleted, FileInfoResponse, FileUrlResponse};
use crate::state::AppState;

/// Multipart framing on top of the configured file size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Body limit for the upload route. Oversized files still reach the service,
/// which rejects them with a validation error.
pub fn upload_body_limit(max_upload_bytes: u64) -> DefaultBodyLimit {
    let limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(limit)
}

#[utoipa::path(
    post,
    path = "/upload/{id}",
    tag = "Uploads",
    operation_id = "uploadFile",
    summary = "Upload a file for a URL submission",
    description = "Stores the `file` multipart field under a generated name. The object is \
        removed again if its metadata cannot be recorded.",
    params(("id" = String, Path, description = "Submission ID")),
    request_body(content_type = "multipart/form-data", description = "Single `file` field"),
    responses(
        (status = 201, description = "File stored", body = FileInfoResponse),
        (status = 400, description = "Missing, empty or oversized file (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR, STORE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, multipart))]
pub async fn upload_file(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let uploads = state.uploads()?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
        file = Some((file_name, content_type, bytes));
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;

    let stored = uploads
        .upload(&bytes, &file_name, content_type.as_deref(), &submission_id)
        .await?;

    Ok((StatusCode::CREATED, Json(FileInfoResponse::from(stored))))
}

#[utoipa::path(
    get,
    path = "/upload/{id}",
    tag = "Uploads",
    operation_id = "getFileUrl",
    summary = "Get the download URL of an uploaded file",
    params(("id" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File URL", body = FileUrlResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_file_url(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<FileUrlResponse>, AppError> {
    Ok(Json(state.uploads()?.get_file_url(&file_name).await?))
}

#[utoipa::path(
    delete,
    path = "/upload/{id}",
    tag = "Uploads",
    operation_id = "deleteFile",
    summary = "Delete an uploaded file and its metadata",
    params(("id" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "File deleted", body = FileDeleted),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "File not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Object could not be deleted (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_file(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Json<FileDeleted>, AppError> {
    Ok(Json(state.uploads()?.delete(&file_name).await?))
}
