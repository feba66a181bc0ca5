use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "file_info")]
pub struct Model {
    /// Generated storage name: UUIDv4 plus the lower-cased original extension.
    #[sea_orm(primary_key, auto_increment = false)]
    pub file_name: String,

    pub orig_file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub content_type: String,
    pub uploaded_at: DateTimeUtc,

    #[sea_orm(indexed)]
    pub submission_id: String,

    /// Object key inside the bucket, e.g. `Snapshot/<file_name>`.
    pub bucket_path: String,
}

impl ActiveModelBehavior for ActiveModel {}
