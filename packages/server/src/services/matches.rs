use std::sync::Arc;

use super::LeagueService;
use crate::error::AppError;
use crate::models::matches::MatchDeleted;
use crate::repository::{MatchFields, MatchRepository, MatchView};

pub struct MatchService {
    repo: Arc<dyn MatchRepository>,
    leagues: Arc<LeagueService>,
}

impl MatchService {
    pub fn new(repo: Arc<dyn MatchRepository>, leagues: Arc<LeagueService>) -> Self {
        Self { repo, leagues }
    }

    async fn require(&self, match_id: i64) -> Result<MatchView, AppError> {
        self.repo
            .get(match_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))
    }

    pub async fn add(&self, match_id: i64, fields: MatchFields) -> Result<MatchView, AppError> {
        self.leagues.get(&fields.league_id).await?;
        if self.repo.get(match_id).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Match {match_id} already exists"
            )));
        }
        Ok(self.repo.add(match_id, fields).await?)
    }

    pub async fn list(&self) -> Result<Vec<MatchView>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, match_id: i64) -> Result<MatchView, AppError> {
        self.require(match_id).await
    }

    /// Overwrite every mutable column and return the stored result.
    pub async fn update(&self, match_id: i64, fields: MatchFields) -> Result<MatchView, AppError> {
        self.require(match_id).await?;
        self.leagues.get(&fields.league_id).await?;
        if self.repo.update(match_id, fields).await? == 0 {
            return Err(AppError::NotFound(format!("Match {match_id} not found")));
        }
        self.require(match_id).await
    }

    pub async fn delete(&self, match_id: i64) -> Result<MatchDeleted, AppError> {
        let current = self.require(match_id).await?;
        if self.repo.delete(match_id).await? == 0 {
            return Err(AppError::NotFound(format!("Match {match_id} not found")));
        }
        tracing::info!(match_id, "Match deleted");
        Ok(MatchDeleted {
            message: format!(
                "Match {match_id} ({} VS {}) deleted successfully",
                current.home_team, current.away_team
            ),
            match_id,
        })
    }
}
