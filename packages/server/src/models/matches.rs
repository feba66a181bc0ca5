use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::require_text;
use crate::error::AppError;
use crate::repository::MatchFields;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MatchRequest {
    /// Caller-chosen identifier; must not already exist.
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
}

impl MatchRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(
            &self.home_team,
            &self.away_team,
            &self.league_id,
            &self.status,
        )
    }

    /// Split into the id and the mutable columns.
    pub fn into_parts(self) -> (i64, MatchFields) {
        let fields = MatchFields {
            home_team: self.home_team.trim().to_string(),
            away_team: self.away_team.trim().to_string(),
            league_id: self.league_id.trim().to_string(),
            match_date: self.match_date,
            status: self.status.trim().to_string(),
        };
        (self.match_id, fields)
    }
}

/// Full replacement of a match's mutable columns. The id comes from the path.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct MatchUpdateRequest {
    #[schema(example = "Arsenal")]
    pub home_team: String,
    #[schema(example = "Chelsea")]
    pub away_team: String,
    pub league_id: String,
    pub match_date: DateTime<Utc>,
    #[schema(example = "finished")]
    pub status: String,
}

impl MatchUpdateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(
            &self.home_team,
            &self.away_team,
            &self.league_id,
            &self.status,
        )
    }
}

impl From<MatchUpdateRequest> for MatchFields {
    fn from(req: MatchUpdateRequest) -> Self {
        Self {
            home_team: req.home_team.trim().to_string(),
            away_team: req.away_team.trim().to_string(),
            league_id: req.league_id.trim().to_string(),
            match_date: req.match_date,
            status: req.status.trim().to_string(),
        }
    }
}

fn validate_fields(
    home_team: &str,
    away_team: &str,
    league_id: &str,
    status: &str,
) -> Result<(), AppError> {
    require_text(home_team, "home_team")?;
    require_text(away_team, "away_team")?;
    require_text(league_id, "league_id")?;
    require_text(status, "status")
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MatchDeleted {
    #[schema(example = "Match 1001 (Arsenal VS Chelsea) deleted successfully")]
    pub message: String,
    pub match_id: i64,
}
