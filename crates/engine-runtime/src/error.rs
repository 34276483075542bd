use connectors::{
    file::csv::error::FileError, object_store::error::UploadError, sql::base::error::DbError,
};
use thiserror::Error;

/// Top-level errors for an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Connecting, querying or disconnecting failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// The temporary CSV file could not be created or written.
    #[error("Error saving CSV to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: FileError,
    },

    /// The object store rejected the file.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// The temporary CSV file could not be removed after a successful upload.
    #[error("Failed to remove temporary file {path}: {source}")]
    Cleanup {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// The pipeline stage the error originated in.
    pub fn stage(&self) -> &'static str {
        match self {
            ExportError::Database(DbError::Connection { .. }) => "connect",
            ExportError::Database(DbError::Disconnect(_)) => "disconnect",
            ExportError::Database(_) => "extract",
            ExportError::Io { .. } => "write",
            ExportError::Upload(_) => "upload",
            ExportError::Cleanup { .. } => "cleanup",
        }
    }
}
