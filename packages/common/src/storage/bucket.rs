use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};

use super::error::StorageError;
use super::traits::{ObjectStore, validate_key};
use crate::config::StorageConfig;

/// S3-compatible bucket store.
///
/// URLs are presigned GETs valid for `url_expiry_secs`, unless a public base
/// URL is configured.
pub struct S3ObjectStore {
    bucket: Box<Bucket>,
    url_expiry_secs: u32,
    public_base_url: Option<String>,
}

fn backend_err(err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(err.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

impl S3ObjectStore {
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse()
                .map_err(|e| StorageError::Config(format!("invalid region: {e}")))?,
        };

        let credentials = Credentials::new(
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(format!("invalid credentials: {e}")))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Config(e.to_string()))?;
        if config.path_style {
            bucket = bucket.with_path_style();
        }

        Ok(Self {
            bucket,
            url_expiry_secs: config.url_expiry_secs,
            public_base_url: config.public_base_url.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<u64, StorageError> {
        validate_key(key)?;
        let response = self
            .bucket
            .put_object_with_content_type(key, data, content_type)
            .await
            .map_err(backend_err)?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "put '{key}' returned status {}",
                response.status_code()
            )));
        }
        Ok(data.len() as u64)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        let response = self.bucket.get_object(key).await.map_err(backend_err)?;
        match response.status_code() {
            404 => Err(StorageError::NotFound(key.to_string())),
            s if is_success(s) => Ok(response.bytes().to_vec()),
            s => Err(StorageError::Backend(format!("get '{key}' returned status {s}"))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let (_, status) = self.bucket.head_object(key).await.map_err(backend_err)?;
        match status {
            404 => Ok(false),
            s if is_success(s) => Ok(true),
            s => Err(StorageError::Backend(format!("head '{key}' returned status {s}"))),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        // S3 reports success for missing keys, so probe first.
        if !self.exists(key).await? {
            return Ok(false);
        }
        let response = self.bucket.delete_object(key).await.map_err(backend_err)?;
        if !is_success(response.status_code()) {
            return Err(StorageError::Backend(format!(
                "delete '{key}' returned status {}",
                response.status_code()
            )));
        }
        Ok(true)
    }

    async fn url(&self, key: &str) -> Result<String, StorageError> {
        validate_key(key)?;
        if let Some(base) = &self.public_base_url {
            return Ok(format!("{}/{key}", base.trim_end_matches('/')));
        }
        self.bucket
            .presign_get(key, self.url_expiry_secs, None)
            .await
            .map_err(backend_err)
    }
}
