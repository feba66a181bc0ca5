use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::file_info;

/// Metadata of a stored upload.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FileInfoResponse {
    /// Generated storage name (UUID plus extension).
    #[schema(example = "9b2d7c1e-4a5f-4e3b-8c6d-1f2e3a4b5c6d.png")]
    pub file_name: String,
    /// Name the client uploaded the file under.
    #[schema(example = "goal.png")]
    pub orig_file_name: String,
    pub file_url: String,
    #[schema(example = 48213)]
    pub file_size: i64,
    #[schema(example = "image/png")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub submission_id: String,
    #[schema(example = "Snapshot/9b2d7c1e-4a5f-4e3b-8c6d-1f2e3a4b5c6d.png")]
    pub bucket_path: String,
}

impl From<file_info::Model> for FileInfoResponse {
    fn from(f: file_info::Model) -> Self {
        Self {
            file_name: f.file_name,
            orig_file_name: f.orig_file_name,
            file_url: f.file_url,
            file_size: f.file_size,
            content_type: f.content_type,
            uploaded_at: f.uploaded_at,
            submission_id: f.submission_id,
            bucket_path: f.bucket_path,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FileUrlResponse {
    pub file_name: String,
    pub file_url: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FileDeleted {
    #[schema(example = "File deleted successfully")]
    pub message: String,
    pub file_name: String,
}
