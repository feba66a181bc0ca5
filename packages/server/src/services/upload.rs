use std::sync::Arc;

use chrono::Utc;
use common::storage::ObjectStore;

use super::UrlSubmissionService;
use crate::entity::file_info;
use crate::error::AppError;
use crate::models::file::{FileDeleted, FileUrlResponse};
use crate::repository::FileInfoRepository;
use crate::utils::filename::{storage_name, validate_flat_filename};

/// Stores uploaded files as objects and keeps their metadata in `file_info`.
pub struct FileUploadService {
    store: Arc<dyn ObjectStore>,
    files: Arc<dyn FileInfoRepository>,
    submissions: Arc<UrlSubmissionService>,
    path_prefix: String,
    max_upload_bytes: u64,
}

impl FileUploadService {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        files: Arc<dyn FileInfoRepository>,
        submissions: Arc<UrlSubmissionService>,
        path_prefix: &str,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            store,
            files,
            submissions,
            path_prefix: path_prefix.trim_matches('/').to_string(),
            max_upload_bytes,
        }
    }

    fn object_key(&self, file_name: &str) -> String {
        if self.path_prefix.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{file_name}", self.path_prefix)
        }
    }

    async fn require(&self, file_name: &str) -> Result<file_info::Model, AppError> {
        self.files
            .get(file_name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("File '{file_name}' not found")))
    }

    /// Remove an object whose metadata could not be recorded.
    async fn discard(&self, key: &str) {
        match self.store.delete(key).await {
            Ok(_) => tracing::warn!(key, "Removed uploaded object after failed upload"),
            Err(e) => tracing::error!(key, error = %e, "Failed to remove orphaned object"),
        }
    }

    /// Upload `content` for `submission_id`.
    ///
    /// The object is written first, then its URL resolved, then metadata
    /// persisted. If either later step fails the object is deleted again.
    pub async fn upload(
        &self,
        content: &[u8],
        original_name: &str,
        content_type: Option<&str>,
        submission_id: &str,
    ) -> Result<file_info::Model, AppError> {
        self.submissions.get(submission_id).await?;

        let original_name = validate_flat_filename(original_name)
            .map_err(|e| AppError::Validation(e.message().into()))?;
        if content.is_empty() {
            return Err(AppError::Validation("File is empty".into()));
        }
        if content.len() as u64 > self.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "File is too large ({} bytes, limit {} bytes)",
                content.len(),
                self.max_upload_bytes
            )));
        }

        let content_type = match content_type {
            Some(ct) if !ct.trim().is_empty() => ct.to_string(),
            _ => mime_guess::from_path(original_name)
                .first_or_octet_stream()
                .to_string(),
        };
        let file_name = storage_name(original_name);
        let key = self.object_key(&file_name);

        let size = self.store.put(&key, content, &content_type).await?;

        let file_url = match self.store.url(&key).await {
            Ok(url) => url,
            Err(e) => {
                self.discard(&key).await;
                return Err(e.into());
            }
        };

        let record = file_info::Model {
            file_name,
            orig_file_name: original_name.to_string(),
            file_url,
            file_size: size as i64,
            content_type,
            uploaded_at: Utc::now(),
            submission_id: submission_id.to_string(),
            bucket_path: key.clone(),
        };

        match self.files.add(record).await {
            Ok(stored) => {
                tracing::info!(file_name = %stored.file_name, submission_id, size, "File uploaded");
                Ok(stored)
            }
            Err(e) => {
                self.discard(&key).await;
                Err(e.into())
            }
        }
    }

    /// Delete the object, then its metadata. Metadata survives a failed object delete.
    pub async fn delete(&self, file_name: &str) -> Result<FileDeleted, AppError> {
        let file = self.require(file_name).await?;

        if !self.store.delete(&file.bucket_path).await? {
            tracing::warn!(key = %file.bucket_path, "Object was already missing; removing metadata");
        }
        if self.files.delete(file_name).await? == 0 {
            return Err(AppError::NotFound(format!("File '{file_name}' not found")));
        }

        Ok(FileDeleted {
            message: "File deleted successfully".into(),
            file_name: file_name.to_string(),
        })
    }

    /// URL recorded at upload time.
    pub async fn get_file_url(&self, file_name: &str) -> Result<FileUrlResponse, AppError> {
        let file = self.require(file_name).await?;
        Ok(FileUrlResponse {
            file_name: file.file_name,
            file_url: file.file_url,
        })
    }

    /// Files recorded against `submission_id`, which need not still exist.
    pub async fn list_by_submission(
        &self,
        submission_id: &str,
    ) -> Result<Vec<file_info::Model>, AppError> {
        Ok(self.files.list_by_submission(submission_id).await?)
    }
}
