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
use crate::models::matches::{MatchDeleted, MatchRequest, MatchUpdateRequest};
use crate::repository::MatchView;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/matches",
    tag = "Matches",
    operation_id = "createMatch",
    summary = "Create a match",
    description = "The match id is chosen by the caller. The referenced league must exist.",
    request_body = MatchRequest,
    responses(
        (status = 201, description = "Match created", body = MatchView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "League not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Match id already taken (ALREADY_EXISTS)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(match_id = payload.match_id))]
pub async fn create_match(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<MatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (match_id, fields) = payload.into_parts();
    let view = state.matches()?.add(match_id, fields).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/matches",
    tag = "Matches",
    operation_id = "listMatches",
    summary = "List matches, latest kick-off first",
    responses(
        (status = 200, description = "All matches with league names", body = Vec<MatchView>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_matches(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchView>>, AppError> {
    Ok(Json(state.matches()?.list().await?))
}

#[utoipa::path(
    get,
    path = "/matches/{match_id}",
    tag = "Matches",
    operation_id = "getMatch",
    summary = "Get a match by id",
    params(("match_id" = i64, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match", body = MatchView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_match(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchView>, AppError> {
    Ok(Json(state.matches()?.get(match_id).await?))
}

#[utoipa::path(
    put,
    path = "/matches/{match_id}",
    tag = "Matches",
    operation_id = "updateMatch",
    summary = "Replace a match's details",
    params(("match_id" = i64, Path, description = "Match ID")),
    request_body = MatchUpdateRequest,
    responses(
        (status = 200, description = "Updated match", body = MatchView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Match or league not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_match(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
    AppJson(payload): AppJson<MatchUpdateRequest>,
) -> Result<Json<MatchView>, AppError> {
    payload.validate()?;
    Ok(Json(state.matches()?.update(match_id, payload.into()).await?))
}

#[utoipa::path(
    delete,
    path = "/matches/{match_id}",
    tag = "Matches",
    operation_id = "deleteMatch",
    summary = "Delete a match",
    params(("match_id" = i64, Path, description = "Match ID")),
    responses(
        (status = 200, description = "Match deleted", body = MatchDeleted),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "Match not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_match(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchDeleted>, AppError> {
    Ok(Json(state.matches()?.delete(match_id).await?))
}
