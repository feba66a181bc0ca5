use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use super::{
    NewUrlSubmission, UrlSubmissionPatch, UrlSubmissionRepository, UrlSubmissionView, match_label,
};
use crate::entity::{league, match_record, url_submission};

pub struct SeaOrmUrlSubmissionRepository {
    db: DatabaseConnection,
}

impl SeaOrmUrlSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct SubmissionRow {
    submission_id: String,
    url: String,
    submission_type: Option<String>,
    league_id: Option<String>,
    match_id: Option<i64>,
    status: Option<String>,
    image_file_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    league_name: Option<String>,
    home_team: Option<String>,
    away_team: Option<String>,
    match_date: Option<DateTime<Utc>>,
}

impl From<SubmissionRow> for UrlSubmissionView {
    fn from(row: SubmissionRow) -> Self {
        let matches_name = match (&row.home_team, &row.away_team, row.match_date) {
            (Some(home), Some(away), Some(date)) => Some(match_label(home, away, date)),
            _ => None,
        };
        Self {
            submission_id: row.submission_id,
            url: row.url,
            submission_type: row.submission_type,
            league_id: row.league_id,
            match_id: row.match_id,
            status: row.status,
            image_file_name: row.image_file_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
            league_name: row.league_name,
            matches_name,
        }
    }
}

/// `url_submission LEFT JOIN leagues LEFT JOIN matches`, aliased to [`SubmissionRow`].
fn joined() -> Select<url_submission::Entity> {
    use url_submission::Column;

    let league_rel: RelationDef = url_submission::Entity::belongs_to(league::Entity)
        .from(Column::LeagueId)
        .to(league::Column::LeagueId)
        .into();
    let match_rel: RelationDef = url_submission::Entity::belongs_to(match_record::Entity)
        .from(Column::MatchId)
        .to(match_record::Column::MatchId)
        .into();

    url_submission::Entity::find()
        .select_only()
        .columns([
            Column::SubmissionId,
            Column::Url,
            Column::LeagueId,
            Column::MatchId,
            Column::Status,
            Column::ImageFileName,
            Column::CreatedAt,
            Column::UpdatedAt,
        ])
        .column_as(Column::SubmissionType, "submission_type")
        .column_as(league::Column::LeagueName, "league_name")
        .column_as(match_record::Column::HomeTeam, "home_team")
        .column_as(match_record::Column::AwayTeam, "away_team")
        .column_as(match_record::Column::MatchDate, "match_date")
        .join(JoinType::LeftJoin, league_rel)
        .join(JoinType::LeftJoin, match_rel)
}

#[async_trait]
impl UrlSubmissionRepository for SeaOrmUrlSubmissionRepository {
    async fn add(&self, new: NewUrlSubmission) -> Result<String, DbErr> {
        let now = Utc::now();
        let model = url_submission::ActiveModel {
            submission_id: Set(Uuid::new_v4().to_string()),
            url: Set(new.url),
            submission_type: Set(new.submission_type),
            league_id: Set(new.league_id),
            match_id: Set(new.match_id),
            status: Set(new.status),
            image_file_name: Set(new.image_file_name),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let stored = model.insert(&self.db).await?;
        Ok(stored.submission_id)
    }

    async fn get(&self, submission_id: &str) -> Result<Option<UrlSubmissionView>, DbErr> {
        let row = joined()
            .filter(url_submission::Column::SubmissionId.eq(submission_id))
            .into_model::<SubmissionRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(UrlSubmissionView::from))
    }

    async fn list(&self) -> Result<Vec<UrlSubmissionView>, DbErr> {
        let rows = joined()
            .order_by_desc(url_submission::Column::CreatedAt)
            .into_model::<SubmissionRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(UrlSubmissionView::from).collect())
    }

    async fn update(&self, submission_id: &str, patch: UrlSubmissionPatch) -> Result<u64, DbErr> {
        let mut model = url_submission::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(url) = patch.url {
            model.url = Set(url);
        }
        if let Some(kind) = patch.submission_type {
            model.submission_type = Set(Some(kind));
        }
        if let Some(league_id) = patch.league_id {
            model.league_id = Set(Some(league_id));
        }
        if let Some(match_id) = patch.match_id {
            model.match_id = Set(Some(match_id));
        }
        if let Some(status) = patch.status {
            model.status = Set(Some(status));
        }
        if let Some(image) = patch.image_file_name {
            model.image_file_name = Set(Some(image));
        }

        let result = url_submission::Entity::update_many()
            .set(model)
            .filter(url_submission::Column::SubmissionId.eq(submission_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, submission_id: &str) -> Result<u64, DbErr> {
        let result = url_submission::Entity::delete_by_id(submission_id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn check_url_exists_in_match(&self, url: &str, match_id: i64) -> Result<bool, DbErr> {
        let count = url_submission::Entity::find()
            .filter(url_submission::Column::Url.eq(url))
            .filter(url_submission::Column::MatchId.eq(match_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
