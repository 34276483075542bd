use async_trait::async_trait;
use error::UploadError;
use std::path::Path;

pub mod error;
pub mod params;
pub mod s3;

/// Destination for exported files.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Transfers the bytes of `local_path` to `bucket`/`key`.
    async fn upload(&self, local_path: &Path, bucket: &str, key: &str) -> Result<(), UploadError>;
}
