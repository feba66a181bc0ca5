use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    /// Caller-supplied identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub match_id: i64,

    pub home_team: String,
    pub away_team: String,

    /// Not a database foreign key; the match service checks it.
    #[sea_orm(indexed)]
    pub league_id: String,

    pub match_date: DateTimeUtc,
    pub status: String,
}

impl ActiveModelBehavior for ActiveModel {}
