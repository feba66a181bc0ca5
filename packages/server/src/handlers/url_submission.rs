use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::file::FileInfoResponse;
use crate::models::url_submission::{
    UrlSubmissionDeleted, UrlSubmissionRequest, UrlSubmissionUpdateRequest,
};
use crate::repository::UrlSubmissionView;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/url_submission",
    tag = "URL Submissions",
    operation_id = "createUrlSubmission",
    summary = "Submit a URL",
    description = "Referenced league and match must exist when given. A URL may be submitted \
        only once per match. `image_file_name` must end in `.png`, `.jpg` or `.jpeg`.",
    request_body = UrlSubmissionRequest,
    responses(
        (status = 201, description = "Submission created", body = UrlSubmissionView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "League or match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "URL already submitted for this match (ALREADY_EXISTS)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(match_id = ?payload.match_id))]
pub async fn create_submission(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UrlSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let view = state.submissions()?.add(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/url_submission",
    tag = "URL Submissions",
    operation_id = "listUrlSubmissions",
    summary = "List URL submissions, newest first",
    responses(
        (status = 200, description = "All submissions with league and match labels", body = Vec<UrlSubmissionView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_submissions(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlSubmissionView>>, AppError> {
    Ok(Json(state.submissions()?.list().await?))
}

#[utoipa::path(
    get,
    path = "/url_submission/{submission_id}",
    tag = "URL Submissions",
    operation_id = "getUrlSubmission",
    summary = "Get a URL submission by id",
    params(("submission_id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission", body = UrlSubmissionView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_submission(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<UrlSubmissionView>, AppError> {
    Ok(Json(state.submissions()?.get(&submission_id).await?))
}

#[utoipa::path(
    put,
    path = "/url_submission/{submission_id}",
    tag = "URL Submissions",
    operation_id = "updateUrlSubmission",
    summary = "Update a URL submission",
    description = "Only the supplied fields change. Changing the URL or match re-checks \
        uniqueness of the pair.",
    params(("submission_id" = String, Path, description = "Submission ID")),
    request_body = UrlSubmissionUpdateRequest,
    responses(
        (status = 200, description = "Updated submission", body = UrlSubmissionView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Submission, league or match not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "URL already submitted for this match (ALREADY_EXISTS)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_submission(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
    AppJson(payload): AppJson<UrlSubmissionUpdateRequest>,
) -> Result<Json<UrlSubmissionView>, AppError> {
    payload.validate()?;
    let view = state
        .submissions()?
        .update(&submission_id, payload.into())
        .await?;
    Ok(Json(view))
}

#[utoipa::path(
    delete,
    path = "/url_submission/{submission_id}",
    tag = "URL Submissions",
    operation_id = "deleteUrlSubmission",
    summary = "Delete a URL submission",
    params(("submission_id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission deleted", body = UrlSubmissionDeleted),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_submission(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<UrlSubmissionDeleted>, AppError> {
    Ok(Json(state.submissions()?.delete(&submission_id).await?))
}

#[utoipa::path(
    get,
    path = "/url_submission/{submission_id}/files",
    tag = "URL Submissions",
    operation_id = "listSubmissionFiles",
    summary = "List files uploaded for a submission",
    params(("submission_id" = String, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Uploaded files, newest first; empty if none", body = Vec<FileInfoResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_submission_files(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> Result<Json<Vec<FileInfoResponse>>, AppError> {
    let files = state.uploads()?.list_by_submission(&submission_id).await?;
    Ok(Json(files.into_iter().map(FileInfoResponse::from).collect()))
}
