//! In-process implementation of every repository trait.
//!
//! Backs `database.url = "memory://"` and the test suites. All tables sit
//! behind one lock so joined reads see a consistent snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    FileInfoRepository, LeaguePatch, LeagueRepository, MatchFields, MatchRepository, MatchView,
    NewLeague, NewUrlSubmission, NewUser, UrlSubmissionPatch, UrlSubmissionRepository,
    UrlSubmissionView, UserRepository, match_label,
};
use crate::entity::{file_info, league, match_record, url_submission, user};

#[derive(Default)]
struct Tables {
    users: HashMap<String, user::Model>,
    leagues: HashMap<String, league::Model>,
    matches: HashMap<i64, match_record::Model>,
    submissions: HashMap<String, url_submission::Model>,
    files: HashMap<String, file_info::Model>,
}

impl Tables {
    fn match_view(&self, m: &match_record::Model) -> MatchView {
        MatchView {
            match_id: m.match_id,
            home_team: m.home_team.clone(),
            away_team: m.away_team.clone(),
            league_id: m.league_id.clone(),
            match_date: m.match_date,
            status: m.status.clone(),
            league_name: self.leagues.get(&m.league_id).map(|l| l.league_name.clone()),
        }
    }

    fn submission_view(&self, s: &url_submission::Model) -> UrlSubmissionView {
        let league_name = s
            .league_id
            .as_ref()
            .and_then(|id| self.leagues.get(id))
            .map(|l| l.league_name.clone());
        let matches_name = s
            .match_id
            .and_then(|id| self.matches.get(&id))
            .map(|m| match_label(&m.home_team, &m.away_team, m.match_date));
        UrlSubmissionView {
            submission_id: s.submission_id.clone(),
            url: s.url.clone(),
            submission_type: s.submission_type.clone(),
            league_id: s.league_id.clone(),
            match_id: s.match_id,
            status: s.status.clone(),
            image_file_name: s.image_file_name.clone(),
            created_at: s.created_at,
            updated_at: s.updated_at,
            league_name,
            matches_name,
        }
    }
}

/// Cheaply cloneable handle; clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of file metadata rows, for asserting on upload side effects.
    pub async fn file_count(&self) -> usize {
        self.tables.read().await.files.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn update_last_login(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, DbErr> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(user_id) {
            Some(u) => {
                u.last_login = Some(at);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn create(&self, new: NewUser) -> Result<user::Model, DbErr> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == new.username) {
            return Err(DbErr::Custom(format!(
                "duplicate key value violates unique constraint on username '{}'",
                new.username
            )));
        }
        let model = user::Model {
            user_id: Uuid::new_v4().to_string(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            is_active: new.is_active,
            created_at: Utc::now(),
            last_login: None,
        };
        tables.users.insert(model.user_id.clone(), model.clone());
        Ok(model)
    }
}

#[async_trait]
impl LeagueRepository for MemoryStore {
    async fn add(&self, new: NewLeague) -> Result<league::Model, DbErr> {
        let now = Utc::now();
        let model = league::Model {
            league_id: Uuid::new_v4().to_string(),
            league_name: new.league_name,
            country: new.country,
            season: new.season,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .leagues
            .insert(model.league_id.clone(), model.clone());
        Ok(model)
    }

    async fn get(&self, league_id: &str) -> Result<Option<league::Model>, DbErr> {
        Ok(self.tables.read().await.leagues.get(league_id).cloned())
    }

    async fn list(&self) -> Result<Vec<league::Model>, DbErr> {
        let mut leagues: Vec<_> = self.tables.read().await.leagues.values().cloned().collect();
        leagues.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leagues)
    }

    async fn update(&self, league_id: &str, patch: LeaguePatch) -> Result<u64, DbErr> {
        let mut tables = self.tables.write().await;
        let Some(l) = tables.leagues.get_mut(league_id) else {
            return Ok(0);
        };
        if let Some(name) = patch.league_name {
            l.league_name = name;
        }
        if let Some(country) = patch.country {
            l.country = country;
        }
        if let Some(season) = patch.season {
            l.season = season;
        }
        if let Some(status) = patch.status {
            l.status = status;
        }
        l.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, league_id: &str) -> Result<u64, DbErr> {
        let removed = self.tables.write().await.leagues.remove(league_id);
        Ok(removed.is_some() as u64)
    }
}

#[async_trait]
impl MatchRepository for MemoryStore {
    async fn add(&self, match_id: i64, fields: MatchFields) -> Result<MatchView, DbErr> {
        let mut tables = self.tables.write().await;
        // Mirrors the primary key constraint of the real table.
        if tables.matches.contains_key(&match_id) {
            return Err(DbErr::Custom(format!(
                "duplicate key value violates primary key on match_id {match_id}"
            )));
        }
        let model = match_record::Model {
            match_id,
            home_team: fields.home_team,
            away_team: fields.away_team,
            league_id: fields.league_id,
            match_date: fields.match_date,
            status: fields.status,
        };
        let view = tables.match_view(&model);
        tables.matches.insert(match_id, model);
        Ok(view)
    }

    async fn get(&self, match_id: i64) -> Result<Option<MatchView>, DbErr> {
        let tables = self.tables.read().await;
        Ok(tables.matches.get(&match_id).map(|m| tables.match_view(m)))
    }

    async fn list(&self) -> Result<Vec<MatchView>, DbErr> {
        let tables = self.tables.read().await;
        let mut views: Vec<_> = tables.matches.values().map(|m| tables.match_view(m)).collect();
        views.sort_by(|a, b| b.match_date.cmp(&a.match_date));
        Ok(views)
    }

    async fn update(&self, match_id: i64, fields: MatchFields) -> Result<u64, DbErr> {
        let mut tables = self.tables.write().await;
        let Some(m) = tables.matches.get_mut(&match_id) else {
            return Ok(0);
        };
        m.home_team = fields.home_team;
        m.away_team = fields.away_team;
        m.league_id = fields.league_id;
        m.match_date = fields.match_date;
        m.status = fields.status;
        Ok(1)
    }

    async fn delete(&self, match_id: i64) -> Result<u64, DbErr> {
        let removed = self.tables.write().await.matches.remove(&match_id);
        Ok(removed.is_some() as u64)
    }
}

#[async_trait]
impl UrlSubmissionRepository for MemoryStore {
    async fn add(&self, new: NewUrlSubmission) -> Result<String, DbErr> {
        let now = Utc::now();
        let model = url_submission::Model {
            submission_id: Uuid::new_v4().to_string(),
            url: new.url,
            submission_type: new.submission_type,
            league_id: new.league_id,
            match_id: new.match_id,
            status: new.status,
            image_file_name: new.image_file_name,
            created_at: now,
            updated_at: now,
        };
        let id = model.submission_id.clone();
        self.tables.write().await.submissions.insert(id.clone(), model);
        Ok(id)
    }

    async fn get(&self, submission_id: &str) -> Result<Option<UrlSubmissionView>, DbErr> {
        let tables = self.tables.read().await;
        Ok(tables
            .submissions
            .get(submission_id)
            .map(|s| tables.submission_view(s)))
    }

    async fn list(&self) -> Result<Vec<UrlSubmissionView>, DbErr> {
        let tables = self.tables.read().await;
        let mut views: Vec<_> = tables
            .submissions
            .values()
            .map(|s| tables.submission_view(s))
            .collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(views)
    }

    async fn update(&self, submission_id: &str, patch: UrlSubmissionPatch) -> Result<u64, DbErr> {
        let mut tables = self.tables.write().await;
        let Some(s) = tables.submissions.get_mut(submission_id) else {
            return Ok(0);
        };
        if let Some(url) = patch.url {
            s.url = url;
        }
        if patch.submission_type.is_some() {
            s.submission_type = patch.submission_type;
        }
        if patch.league_id.is_some() {
            s.league_id = patch.league_id;
        }
        if patch.match_id.is_some() {
            s.match_id = patch.match_id;
        }
        if patch.status.is_some() {
            s.status = patch.status;
        }
        if patch.image_file_name.is_some() {
            s.image_file_name = patch.image_file_name;
        }
        s.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, submission_id: &str) -> Result<u64, DbErr> {
        let removed = self.tables.write().await.submissions.remove(submission_id);
        Ok(removed.is_some() as u64)
    }

    async fn check_url_exists_in_match(&self, url: &str, match_id: i64) -> Result<bool, DbErr> {
        let tables = self.tables.read().await;
        Ok(tables
            .submissions
            .values()
            .any(|s| s.url == url && s.match_id == Some(match_id)))
    }
}

#[async_trait]
impl FileInfoRepository for MemoryStore {
    async fn add(&self, file: file_info::Model) -> Result<file_info::Model, DbErr> {
        self.tables
            .write()
            .await
            .files
            .insert(file.file_name.clone(), file.clone());
        Ok(file)
    }

    async fn get(&self, file_name: &str) -> Result<Option<file_info::Model>, DbErr> {
        Ok(self.tables.read().await.files.get(file_name).cloned())
    }

    async fn list_by_submission(&self, submission_id: &str) -> Result<Vec<file_info::Model>, DbErr> {
        let mut files: Vec<_> = self
            .tables
            .read()
            .await
            .files
            .values()
            .filter(|f| f.submission_id == submission_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(files)
    }

    async fn delete(&self, file_name: &str) -> Result<u64, DbErr> {
        let removed = self.tables.write().await.files.remove(file_name);
        Ok(removed.is_some() as u64)
    }
}
