use async_trait::async_trait;
use sea_orm::*;

use super::FileInfoRepository;
use crate::entity::file_info;

pub struct SeaOrmFileInfoRepository {
    db: DatabaseConnection,
}

impl SeaOrmFileInfoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileInfoRepository for SeaOrmFileInfoRepository {
    async fn add(&self, file: file_info::Model) -> Result<file_info::Model, DbErr> {
        let model = file_info::ActiveModel {
            file_name: Set(file.file_name),
            orig_file_name: Set(file.orig_file_name),
            file_url: Set(file.file_url),
            file_size: Set(file.file_size),
            content_type: Set(file.content_type),
            uploaded_at: Set(file.uploaded_at),
            submission_id: Set(file.submission_id),
            bucket_path: Set(file.bucket_path),
        };
        model.insert(&self.db).await
    }

    async fn get(&self, file_name: &str) -> Result<Option<file_info::Model>, DbErr> {
        file_info::Entity::find_by_id(file_name.to_owned())
            .one(&self.db)
            .await
    }

    async fn list_by_submission(&self, submission_id: &str) -> Result<Vec<file_info::Model>, DbErr> {
        file_info::Entity::find()
            .filter(file_info::Column::SubmissionId.eq(submission_id))
            .order_by_desc(file_info::Column::UploadedAt)
            .all(&self.db)
            .await
    }

    async fn delete(&self, file_name: &str) -> Result<u64, DbErr> {
        let result = file_info::Entity::delete_by_id(file_name.to_owned())
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
