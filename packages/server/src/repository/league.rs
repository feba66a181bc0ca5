use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use super::{LeagueRepository, LeaguePatch, NewLeague};
use crate::entity::league;

pub struct SeaOrmLeagueRepository {
    db: DatabaseConnection,
}

impl SeaOrmLeagueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeagueRepository for SeaOrmLeagueRepository {
    async fn add(&self, new: NewLeague) -> Result<league::Model, DbErr> {
        let now = Utc::now();
        let model = league::ActiveModel {
            league_id: Set(Uuid::new_v4().to_string()),
            league_name: Set(new.league_name),
            country: Set(new.country),
            season: Set(new.season),
            status: Set(new.status),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&self.db).await
    }

    async fn get(&self, league_id: &str) -> Result<Option<league::Model>, DbErr> {
        league::Entity::find_by_id(league_id.to_owned())
            .one(&self.db)
            .await
    }

    async fn list(&self) -> Result<Vec<league::Model>, DbErr> {
        league::Entity::find()
            .order_by_desc(league::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn update(&self, league_id: &str, patch: LeaguePatch) -> Result<u64, DbErr> {
        let mut model = league::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = patch.league_name {
            model.league_name = Set(name);
        }
        if let Some(country) = patch.country {
            model.country = Set(country);
        }
        if let Some(season) = patch.season {
            model.season = Set(season);
        }
        if let Some(status) = patch.status {
            model.status = Set(status);
        }

        let result = league::Entity::update_many()
            .set(model)
            .filter(league::Column::LeagueId.eq(league_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, league_id: &str) -> Result<u64, DbErr> {
        let result = league::Entity::delete_by_id(league_id.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
