use serde::Deserialize;

/// Which object store implementation backs uploads.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// S3-compatible bucket (AWS, GCS interoperability, MinIO).
    #[default]
    S3,
    /// Local directory tree.
    Filesystem,
    /// Process memory; contents vanish on restart.
    Memory,
}

/// Object storage configuration shared by every backend.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Backend selection. Default: "s3".
    #[serde(default)]
    pub backend: StorageBackend,
    /// Bucket name (s3 backend). Default: "league-uploads".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Bucket region (s3 backend). Default: "us-east-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services, e.g. "http://localhost:9000".
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use path-style bucket addressing (required by MinIO). Default: false.
    #[serde(default)]
    pub path_style: bool,
    /// Key prefix for uploaded objects. Default: "Snapshot".
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Lifetime of generated download URLs in seconds. Default: 7 days.
    #[serde(default = "default_url_expiry_secs")]
    pub url_expiry_secs: u32,
    /// Root directory (filesystem backend). Default: "./data/uploads".
    #[serde(default = "default_root")]
    pub root: String,
    /// Public base URL; when set, object URLs are `{public_base_url}/{key}`
    /// instead of presigned or `file://` URLs.
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Largest accepted upload in bytes. Default: 10 MiB.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_bucket() -> String {
    "league-uploads".into()
}
fn default_region() -> String {
    "us-east-1".into()
}
fn default_path_prefix() -> String {
    "Snapshot".into()
}
fn default_url_expiry_secs() -> u32 {
    7 * 24 * 60 * 60
}
fn default_root() -> String {
    "./data/uploads".into()
}
fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
            path_prefix: default_path_prefix(),
            url_expiry_secs: default_url_expiry_secs(),
            root: default_root(),
            public_base_url: None,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
