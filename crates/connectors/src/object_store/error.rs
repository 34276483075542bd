use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// The local file could not be opened for streaming.
    #[error("Failed to read {path} for upload: {message}")]
    ReadBody { path: String, message: String },

    /// The store rejected the request or the transport failed.
    #[error("Error uploading to s3://{bucket}/{key}: {message}")]
    PutObject {
        bucket: String,
        key: String,
        message: String,
    },
}
