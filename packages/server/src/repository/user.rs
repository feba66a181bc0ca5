use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::*;
use uuid::Uuid;

use super::{NewUser, UserRepository};
use crate::entity::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    async fn update_last_login(&self, user_id: &str, at: DateTime<Utc>) -> Result<u64, DbErr> {
        let model = user::ActiveModel {
            last_login: Set(Some(at)),
            ..Default::default()
        };
        let result = user::Entity::update_many()
            .set(model)
            .filter(user::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn create(&self, new: NewUser) -> Result<user::Model, DbErr> {
        let model = user::ActiveModel {
            user_id: Set(Uuid::new_v4().to_string()),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(new.role),
            is_active: Set(new.is_active),
            created_at: Set(Utc::now()),
            last_login: Set(None),
        };
        model.insert(&self.db).await
    }
}
