use std::sync::Arc;

use chrono::Duration;
use common::storage::ObjectStore;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::repository::Repositories;
use crate::services::{
    AuthService, FileUploadService, LeagueService, MatchService, UrlSubmissionService,
};

/// Shared handler state.
///
/// A service is `None` when a dependency failed to initialise; its routes
/// then answer 503 and `/health` reports `"error"`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    auth: Option<Arc<AuthService>>,
    leagues: Option<Arc<LeagueService>>,
    matches: Option<Arc<MatchService>>,
    submissions: Option<Arc<UrlSubmissionService>>,
    uploads: Option<Arc<FileUploadService>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repos: Option<Repositories>,
        store: Option<Arc<dyn ObjectStore>>,
    ) -> Self {
        let Some(repos) = repos else {
            return Self {
                config: Arc::new(config),
                auth: None,
                leagues: None,
                matches: None,
                submissions: None,
                uploads: None,
            };
        };

        let auth = Arc::new(AuthService::new(
            repos.users,
            &config.auth.jwt_secret,
            Duration::hours(config.auth.token_ttl_hours),
        ));
        let leagues = Arc::new(LeagueService::new(repos.leagues));
        let matches = Arc::new(MatchService::new(repos.matches, leagues.clone()));
        let submissions = Arc::new(UrlSubmissionService::new(
            repos.submissions,
            leagues.clone(),
            matches.clone(),
        ));
        let uploads = store.map(|store| {
            Arc::new(FileUploadService::new(
                store,
                repos.files,
                submissions.clone(),
                &config.storage.path_prefix,
                config.storage.max_upload_bytes,
            ))
        });

        Self {
            config: Arc::new(config),
            auth: Some(auth),
            leagues: Some(leagues),
            matches: Some(matches),
            submissions: Some(submissions),
            uploads,
        }
    }

    pub fn auth(&self) -> Result<&AuthService, AppError> {
        self.auth
            .as_deref()
            .ok_or(AppError::ServiceUnavailable("authentication"))
    }

    pub fn leagues(&self) -> Result<&LeagueService, AppError> {
        self.leagues
            .as_deref()
            .ok_or(AppError::ServiceUnavailable("league"))
    }

    pub fn matches(&self) -> Result<&MatchService, AppError> {
        self.matches
            .as_deref()
            .ok_or(AppError::ServiceUnavailable("match"))
    }

    pub fn submissions(&self) -> Result<&UrlSubmissionService, AppError> {
        self.submissions
            .as_deref()
            .ok_or(AppError::ServiceUnavailable("URL submission"))
    }

    pub fn uploads(&self) -> Result<&FileUploadService, AppError> {
        self.uploads
            .as_deref()
            .ok_or(AppError::ServiceUnavailable("file upload"))
    }

    /// Whether every service initialised.
    pub fn is_healthy(&self) -> bool {
        self.auth.is_some()
            && self.leagues.is_some()
            && self.matches.is_some()
            && self.submissions.is_some()
            && self.uploads.is_some()
    }
}
