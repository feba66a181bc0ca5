use async_trait::async_trait;

use super::error::StorageError;

/// Key-addressed object storage (a bucket, a directory, or a map).
///
/// Keys are `/`-separated relative paths such as `Snapshot/<uuid>.png`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`, replacing any existing object.
    ///
    /// Returns the number of bytes stored.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<u64, StorageError>;

    /// Retrieve all bytes of an object.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Resolve a URL a client can use to retrieve the object.
    async fn url(&self, key: &str) -> Result<String, StorageError>;
}

/// Reject keys that are empty, absolute, or contain `..` / empty segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }
    if key.starts_with('/') || key.contains('\\') || key.contains('\0') {
        return Err(StorageError::InvalidKey(format!("'{key}' is not a relative key")));
    }
    if key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
        return Err(StorageError::InvalidKey(format!(
            "'{key}' contains an empty or relative segment"
        )));
    }
    Ok(())
}
