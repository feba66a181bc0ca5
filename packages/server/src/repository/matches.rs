use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;

use super::{MatchFields, MatchRepository, MatchView};
use crate::entity::{league, match_record};

pub struct SeaOrmMatchRepository {
    db: DatabaseConnection,
}

impl SeaOrmMatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct MatchRow {
    match_id: i64,
    home_team: String,
    away_team: String,
    league_id: String,
    match_date: DateTime<Utc>,
    status: String,
    league_name: Option<String>,
}

impl From<MatchRow> for MatchView {
    fn from(row: MatchRow) -> Self {
        Self {
            match_id: row.match_id,
            home_team: row.home_team,
            away_team: row.away_team,
            league_id: row.league_id,
            match_date: row.match_date,
            status: row.status,
            league_name: row.league_name,
        }
    }
}

/// `matches LEFT JOIN leagues` selecting every match column plus `league_name`.
fn joined() -> Select<match_record::Entity> {
    let league_rel: RelationDef = match_record::Entity::belongs_to(league::Entity)
        .from(match_record::Column::LeagueId)
        .to(league::Column::LeagueId)
        .into();

    match_record::Entity::find()
        .join(JoinType::LeftJoin, league_rel)
        .column_as(league::Column::LeagueName, "league_name")
}

#[async_trait]
impl MatchRepository for SeaOrmMatchRepository {
    async fn add(&self, match_id: i64, fields: MatchFields) -> Result<MatchView, DbErr> {
        let model = match_record::ActiveModel {
            match_id: Set(match_id),
            home_team: Set(fields.home_team),
            away_team: Set(fields.away_team),
            league_id: Set(fields.league_id),
            match_date: Set(fields.match_date),
            status: Set(fields.status),
        };
        let stored = model.insert(&self.db).await?;

        // Read back through the join so the caller gets the league label.
        self.get(stored.match_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("match {match_id} after insert")))
    }

    async fn get(&self, match_id: i64) -> Result<Option<MatchView>, DbErr> {
        let row = joined()
            .filter(match_record::Column::MatchId.eq(match_id))
            .into_model::<MatchRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(MatchView::from))
    }

    async fn list(&self) -> Result<Vec<MatchView>, DbErr> {
        let rows = joined()
            .order_by_desc(match_record::Column::MatchDate)
            .into_model::<MatchRow>()
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(MatchView::from).collect())
    }

    async fn update(&self, match_id: i64, fields: MatchFields) -> Result<u64, DbErr> {
        let model = match_record::ActiveModel {
            home_team: Set(fields.home_team),
            away_team: Set(fields.away_team),
            league_id: Set(fields.league_id),
            match_date: Set(fields.match_date),
            status: Set(fields.status),
            ..Default::default()
        };
        let result = match_record::Entity::update_many()
            .set(model)
            .filter(match_record::Column::MatchId.eq(match_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, match_id: i64) -> Result<u64, DbErr> {
        let result = match_record::Entity::delete_by_id(match_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
