use axum::{Json, extract::State};
use chrono::Utc;

use crate::models::health::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Report whether every service initialised",
    responses(
        (status = 200, description = "Service status", body = HealthResponse),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.is_healthy() { "healthy" } else { "error" };
    Json(HealthResponse {
        status,
        timestamp: Utc::now(),
    })
}
