//! Data access for the five persisted entities.
//!
//! Each repository is a trait so services can be built against either the
//! sea-orm implementation or the in-memory one. Repositories do not check
//! existence or uniqueness: `update`/`delete` report the raw number of rows
//! touched and callers decide what zero means.

mod file_info;
mod league;
mod matches;
pub mod memory;
mod url_submission;
mod user;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;

use crate::entity::{file_info as file_info_entity, league as league_entity, user as user_entity};

pub use file_info::SeaOrmFileInfoRepository;
pub use league::SeaOrmLeagueRepository;
pub use matches::SeaOrmMatchRepository;
pub use memory::MemoryStore;
pub use url_submission::SeaOrmUrlSubmissionRepository;
pub use user::SeaOrmUserRepository;

/// Fields for a user created outside the HTTP surface (seeding, tests).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewLeague {
    pub league_name: String,
    pub country: String,
    pub season: String,
    pub status: String,
}

/// Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct LeaguePatch {
    pub league_name: Option<String>,
    pub country: Option<String>,
    pub season: Option<String>,
    pub status: Option<String>,
}

impl LeaguePatch {
    pub fn is_empty(&self) -> bool {
        self.league_name.is_none()
            && self.country.is_none()
            && self.season.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct MatchFields {
    pub home_team: String,
    pub away_team: String,
    pub league_id: String,
    pub match_date: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct NewUrlSubmission {
    pub url: String,
    pub submission_type: Option<String>,
    pub league_id: Option<String>,
    pub match_id: Option<i64>,
    pub status: Option<String>,
    pub image_file_name: Option<String>,
}

/// Sparse update: only `Some` fields are written, `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct UrlSubmissionPatch {
    pub url: Option<String>,
    pub submission_type: Option<String>,
    pub league_id: Option<String>,
    pub match_id: Option<i64>,
    pub status: Option<String>,
    pub image_file_name: Option<String>,
}

impl UrlSubmissionPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.submission_type.is_none()
            && self.league_id.is_none()
            && self.match_id.is_none()
            && self.status.is_none()
            && self.image_file_name.is_none()
    }
}

/// A match joined with its league's display name.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct MatchView {
    #[schema(example = 1001)]
    pub match_id: i64,
    #[schema(example = "Arsenal")]
    pub home_team: String,
    #[schema(example = "Chelsea")]
    pub away_team: String,
    pub league_id: String,
    pub match_date: DateTime<Utc>,
    #[schema(example = "scheduled")]
    pub status: String,
    /// `None` when the referenced league no longer exists.
    #[schema(example = "Premier League")]
    pub league_name: Option<String>,
}

/// A URL submission joined with league and match labels.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct UrlSubmissionView {
    pub submission_id: String,
    #[schema(example = "https://example.com/highlights/1001")]
    pub url: String,
    #[serde(rename = "type")]
    #[schema(example = "video")]
    pub submission_type: Option<String>,
    pub league_id: Option<String>,
    pub match_id: Option<i64>,
    pub status: Option<String>,
    pub image_file_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub league_name: Option<String>,
    /// `"<home> VS <away> (<YYYY-MM-DD>)"`.
    #[schema(example = "Arsenal VS Chelsea (2025-03-01)")]
    pub matches_name: Option<String>,
}

/// Display label for a match, as shown alongside submissions.
pub fn match_label(home_team: &str, away_team: &str, match_date: DateTime<Utc>) -> String {
    format!(
        "{home_team} VS {away_team} ({})",
        match_date.format("%Y-%m-%d")
    )
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_username(&self, username: &str) -> Result<Option<user_entity::Model>, DbErr>;
    async fn update_last_login(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, DbErr>;
    async fn create(&self, user: NewUser) -> Result<user_entity::Model, DbErr>;
}

#[async_trait]
pub trait LeagueRepository: Send + Sync {
    async fn add(&self, league: NewLeague) -> Result<league_entity::Model, DbErr>;
    async fn get(&self, league_id: &str) -> Result<Option<league_entity::Model>, DbErr>;
    async fn list(&self) -> Result<Vec<league_entity::Model>, DbErr>;
    async fn update(&self, league_id: &str, patch: LeaguePatch) -> Result<u64, DbErr>;
    async fn delete(&self, league_id: &str) -> Result<u64, DbErr>;
}

#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn add(&self, match_id: i64, fields: MatchFields) -> Result<MatchView, DbErr>;
    async fn get(&self, match_id: i64) -> Result<Option<MatchView>, DbErr>;
    async fn list(&self) -> Result<Vec<MatchView>, DbErr>;
    async fn update(&self, match_id: i64, fields: MatchFields) -> Result<u64, DbErr>;
    async fn delete(&self, match_id: i64) -> Result<u64, DbErr>;
}

#[async_trait]
pub trait UrlSubmissionRepository: Send + Sync {
    /// Returns the generated submission id.
    async fn add(&self, submission: NewUrlSubmission) -> Result<String, DbErr>;
    async fn get(&self, submission_id: &str) -> Result<Option<UrlSubmissionView>, DbErr>;
    async fn list(&self) -> Result<Vec<UrlSubmissionView>, DbErr>;
    async fn update(&self, submission_id: &str, patch: UrlSubmissionPatch) -> Result<u64, DbErr>;
    async fn delete(&self, submission_id: &str) -> Result<u64, DbErr>;
    async fn check_url_exists_in_match(&self, url: &str, match_id: i64) -> Result<bool, DbErr>;
}

#[async_trait]
pub trait FileInfoRepository: Send + Sync {
    async fn add(&self, file: file_info_entity::Model) -> Result<file_info_entity::Model, DbErr>;
    async fn get(&self, file_name: &str) -> Result<Option<file_info_entity::Model>, DbErr>;
    async fn list_by_submission(
        &self,
        submission_id: &str,
    ) -> Result<Vec<file_info_entity::Model>, DbErr>;
    async fn delete(&self, file_name: &str) -> Result<u64, DbErr>;
}

/// One handle per repository trait, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub leagues: Arc<dyn LeagueRepository>,
    pub matches: Arc<dyn MatchRepository>,
    pub submissions: Arc<dyn UrlSubmissionRepository>,
    pub files: Arc<dyn FileInfoRepository>,
}

impl Repositories {
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            leagues: Arc::new(SeaOrmLeagueRepository::new(db.clone())),
            matches: Arc::new(SeaOrmMatchRepository::new(db.clone())),
            submissions: Arc::new(SeaOrmUrlSubmissionRepository::new(db.clone())),
            files: Arc::new(SeaOrmFileInfoRepository::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Wrap an existing in-memory store, so callers can keep a handle to it.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            leagues: Arc::new(store.clone()),
            matches: Arc::new(store.clone()),
            submissions: Arc::new(store.clone()),
            files: Arc::new(store),
        }
    }
}
