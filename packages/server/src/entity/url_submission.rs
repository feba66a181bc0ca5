use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "url_submission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub submission_id: String,

    pub url: String,

    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub submission_type: Option<String>,

    pub league_id: Option<String>,
    pub match_id: Option<i64>,
    pub status: Option<String>,
    pub image_file_name: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
