use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{require_text, require_text_if_present};
use crate::entity::league;
use crate::error::AppError;
use crate::repository::{LeaguePatch, NewLeague};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LeagueRequest {
    #[schema(example = "Premier League")]
    pub league_name: String,
    #[schema(example = "UK")]
    pub country: String,
    #[schema(example = "2024/25")]
    pub season: String,
    #[schema(example = "active")]
    pub status: String,
}

impl LeagueRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.league_name, "league_name")?;
        require_text(&self.country, "country")?;
        require_text(&self.season, "season")?;
        require_text(&self.status, "status")
    }
}

impl From<LeagueRequest> for NewLeague {
    fn from(req: LeagueRequest) -> Self {
        Self {
            league_name: req.league_name.trim().to_string(),
            country: req.country.trim().to_string(),
            season: req.season.trim().to_string(),
            status: req.status.trim().to_string(),
        }
    }
}

/// Partial update; omitted fields keep their stored values.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct LeagueUpdateRequest {
    pub league_name: Option<String>,
    pub country: Option<String>,
    pub season: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
}

impl LeagueUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text_if_present(self.league_name.as_deref(), "league_name")?;
        require_text_if_present(self.country.as_deref(), "country")?;
        require_text_if_present(self.season.as_deref(), "season")?;
        require_text_if_present(self.status.as_deref(), "status")
    }
}

impl From<LeagueUpdateRequest> for LeaguePatch {
    fn from(req: LeagueUpdateRequest) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            league_name: trim(req.league_name),
            country: trim(req.country),
            season: trim(req.season),
            status: trim(req.status),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LeagueResponse {
    #[schema(example = "0b8f3c6e-2f4d-4f8e-9c1a-5d2b7e9f0a11")]
    pub league_id: String,
    #[schema(example = "Premier League")]
    pub league_name: String,
    #[schema(example = "UK")]
    pub country: String,
    #[schema(example = "2024/25")]
    pub season: String,
    #[schema(example = "active")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<league::Model> for LeagueResponse {
    fn from(l: league::Model) -> Self {
        Self {
            league_id: l.league_id,
            league_name: l.league_name,
            country: l.country,
            season: l.season,
            status: l.status,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LeagueDeleted {
    #[schema(example = "League 'Premier League' (ID: 0b8f3c6e-...) deleted successfully")]
    pub message: String,
    pub league_id: String,
}
