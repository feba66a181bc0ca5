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
use crate::models::league::{LeagueDeleted, LeagueRequest, LeagueResponse, LeagueUpdateRequest};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/leagues",
    tag = "Leagues",
    operation_id = "createLeague",
    summary = "Create a league",
    description = "Creates a league with a generated UUID id. `created_at` and `updated_at` \
        are both set to the creation time.",
    request_body = LeagueRequest,
    responses(
        (status = 201, description = "League created", body = LeagueResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload), fields(league_name = %payload.league_name))]
pub async fn create_league(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<LeagueRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let league = state.leagues()?.add(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(LeagueResponse::from(league))))
}

#[utoipa::path(
    get,
    path = "/leagues",
    tag = "Leagues",
    operation_id = "listLeagues",
    summary = "List leagues, newest first",
    responses(
        (status = 200, description = "All leagues", body = Vec<LeagueResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_leagues(
    _auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<LeagueResponse>>, AppError> {
    let leagues = state.leagues()?.list().await?;
    Ok(Json(leagues.into_iter().map(LeagueResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/leagues/{league_id}",
    tag = "Leagues",
    operation_id = "getLeague",
    summary = "Get a league by id",
    params(("league_id" = String, Path, description = "League ID")),
    responses(
        (status = 200, description = "League", body = LeagueResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "League not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_league(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<LeagueResponse>, AppError> {
    let league = state.leagues()?.get(&league_id).await?;
    Ok(Json(LeagueResponse::from(league)))
}

#[utoipa::path(
    put,
    path = "/leagues/{league_id}",
    tag = "Leagues",
    operation_id = "updateLeague",
    summary = "Update a league",
    description = "Only the supplied fields change. `updated_at` is refreshed on every \
        non-empty update.",
    params(("league_id" = String, Path, description = "League ID")),
    request_body = LeagueUpdateRequest,
    responses(
        (status = 200, description = "Updated league", body = LeagueResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "League not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, payload))]
pub async fn update_league(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    AppJson(payload): AppJson<LeagueUpdateRequest>,
) -> Result<Json<LeagueResponse>, AppError> {
    payload.validate()?;

    let league = state.leagues()?.update(&league_id, payload.into()).await?;

    Ok(Json(LeagueResponse::from(league)))
}

#[utoipa::path(
    delete,
    path = "/leagues/{league_id}",
    tag = "Leagues",
    operation_id = "deleteLeague",
    summary = "Delete a league",
    description = "Matches and submissions that reference the league are left in place.",
    params(("league_id" = String, Path, description = "League ID")),
    responses(
        (status = 200, description = "League deleted", body = LeagueDeleted),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID, TOKEN_EXPIRED)", body = ErrorBody),
        (status = 404, description = "League not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_league(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(league_id): Path<String>,
) -> Result<Json<LeagueDeleted>, AppError> {
    Ok(Json(state.leagues()?.delete(&league_id).await?))
}
