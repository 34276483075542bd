use crate::object_store::{ObjectStore, error::UploadError, params::S3ConnParams};
use async_trait::async_trait;
use aws_sdk_s3::{Client as S3Client, error::DisplayErrorContext, primitives::ByteStream};
use std::path::Path;
use tracing::info;

/// Uploads files to S3 with a single `PutObject` per file.
///
/// Settings given in `S3ConnParams` take precedence over the SDK's default
/// provider chain.
#[derive(Clone, Debug)]
pub struct S3Uploader {
    client: S3Client,
}

impl S3Uploader {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub async fn connect(params: &S3ConnParams) -> Self {
        let config = params.load_config().await;
        Self::new(S3Client::new(&config))
    }
}

#[async_trait]
impl ObjectStore for S3Uploader {
    async fn upload(&self, local_path: &Path, bucket: &str, key: &str) -> Result<(), UploadError> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|err| UploadError::ReadBody {
                path: local_path.display().to_string(),
                message: err.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/csv")
            .body(body)
            .send()
            .await
            .map_err(|err| UploadError::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&err).to_string(),
            })?;

        info!("Uploaded {} to s3://{}/{}", local_path.display(), bucket, key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::BehaviorVersion;
    use aws_sdk_s3::config::{Credentials, Region};

    fn offline_client() -> S3Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url("http://127.0.0.1:1")
            .force_path_style(true)
            .build();
        S3Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_missing_local_file_fails_before_request() {
        let uploader = S3Uploader::new(offline_client());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");

        let err = uploader
            .upload(&missing, "proy-cloud-bucket", "Auth/users.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::ReadBody { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_reports_destination() {
        let uploader = S3Uploader::new(offline_client());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        std::fs::write(&path, "id\n1\n").unwrap();

        let err = uploader
            .upload(&path, "proy-cloud-bucket", "Auth/users.csv")
            .await
            .unwrap_err();
        match err {
            UploadError::PutObject { bucket, key, .. } => {
                assert_eq!(bucket, "proy-cloud-bucket");
                assert_eq!(key, "Auth/users.csv");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
