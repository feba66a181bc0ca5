use std::sync::Arc;

use crate::entity::league;
use crate::error::AppError;
use crate::models::league::LeagueDeleted;
use crate::repository::{LeaguePatch, LeagueRepository, NewLeague};

pub struct LeagueService {
    repo: Arc<dyn LeagueRepository>,
}

impl LeagueService {
    pub fn new(repo: Arc<dyn LeagueRepository>) -> Self {
        Self { repo }
    }

    async fn require(&self, league_id: &str) -> Result<league::Model, AppError> {
        self.repo
            .get(league_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("League '{league_id}' not found")))
    }

    pub async fn add(&self, new: NewLeague) -> Result<league::Model, AppError> {
        Ok(self.repo.add(new).await?)
    }

    pub async fn list(&self) -> Result<Vec<league::Model>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get(&self, league_id: &str) -> Result<league::Model, AppError> {
        self.require(league_id).await
    }

    /// Apply `patch` and return the league as stored afterwards.
    pub async fn update(
        &self,
        league_id: &str,
        patch: LeaguePatch,
    ) -> Result<league::Model, AppError> {
        let current = self.require(league_id).await?;
        if patch.is_empty() {
            return Ok(current);
        }
        if self.repo.update(league_id, patch).await? == 0 {
            return Err(AppError::NotFound(format!("League '{league_id}' not found")));
        }
        self.require(league_id).await
    }

    pub async fn delete(&self, league_id: &str) -> Result<LeagueDeleted, AppError> {
        let league = self.require(league_id).await?;
        if self.repo.delete(league_id).await? == 0 {
            return Err(AppError::NotFound(format!("League '{league_id}' not found")));
        }
        tracing::info!(league_id, "League deleted");
        Ok(LeagueDeleted {
            message: format!(
                "League '{}' (ID: {}) deleted successfully",
                league.league_name, league.league_id
            ),
            league_id: league.league_id,
        })
    }
}
