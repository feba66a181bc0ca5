use utoipa_axum::{router::OpenApiRouter, routes};

use crate::config::AppConfig;
use crate::handlers::{auth, health, league, matches, upload, url_submission};
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(auth_routes())
        .merge(league_routes())
        .merge(match_routes())
        .merge(submission_routes())
        .merge(upload_routes(config.storage.max_upload_bytes))
        .routes(routes!(health::health))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::login))
        .routes(routes!(auth::me))
}

fn league_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(league::list_leagues, league::create_league))
        .routes(routes!(
            league::get_league,
            league::update_league,
            league::delete_league
        ))
}

fn match_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(matches::list_matches, matches::create_match))
        .routes(routes!(
            matches::get_match,
            matches::update_match,
            matches::delete_match
        ))
}

fn submission_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            url_submission::list_submissions,
            url_submission::create_submission
        ))
        .routes(routes!(
            url_submission::get_submission,
            url_submission::update_submission,
            url_submission::delete_submission
        ))
        .routes(routes!(url_submission::list_submission_files))
}

fn upload_routes(max_upload_bytes: u64) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            upload::upload_file,
            upload::get_file_url,
            upload::delete_file
        ))
        .layer(upload::upload_body_limit(max_upload_bytes))
}
