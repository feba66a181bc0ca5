mod error;
mod traits;

pub mod filesystem;
pub mod memory;
#[cfg(feature = "object-storage")]
pub mod bucket;

use std::path::PathBuf;
use std::sync::Arc;

pub use error::StorageError;
pub use traits::{ObjectStore, validate_key};

use crate::config::{StorageBackend, StorageConfig};

/// Build the object store selected by `config.backend`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    tracing::info!(backend = ?config.backend, "Opening object store");
    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(memory::MemoryObjectStore::new())),
        StorageBackend::Filesystem => {
            let store = filesystem::FilesystemObjectStore::new(
                PathBuf::from(&config.root),
                config.max_upload_bytes,
                config.public_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "object-storage")]
        StorageBackend::S3 => Ok(Arc::new(bucket::S3ObjectStore::new(config)?)),
        #[cfg(not(feature = "object-storage"))]
        StorageBackend::S3 => Err(StorageError::Config(
            "s3 backend requires the `object-storage` feature".into(),
        )),
    }
}
