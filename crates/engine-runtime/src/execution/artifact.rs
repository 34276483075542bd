use engine_config::settings::CleanupPolicy;
use std::{
    io,
    path::{Path, PathBuf},
};
use tempfile::TempPath;
use tracing::{info, warn};

/// The local CSV file of one table export.
///
/// `remove` deletes it explicitly after a successful upload. If the artifact
/// is dropped instead, the cleanup policy decides whether the file stays on
/// disk for inspection or is deleted.
#[derive(Debug)]
pub struct CsvArtifact {
    path: Option<TempPath>,
    policy: CleanupPolicy,
}

impl CsvArtifact {
    pub fn create(dir: &Path, table: &str, policy: CleanupPolicy) -> io::Result<Self> {
        let path = tempfile::Builder::new()
            .prefix(&format!("{table}_"))
            .suffix(".csv")
            .tempfile_in(dir)?
            .into_temp_path();

        Ok(Self {
            path: Some(path),
            policy,
        })
    }

    pub fn path(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| unreachable!("artifact path is only taken on remove/drop"))
    }

    /// Deletes the file, reporting any failure.
    pub fn remove(mut self) -> io::Result<PathBuf> {
        let Some(temp) = self.path.take() else {
            unreachable!("artifact path is only taken on remove/drop")
        };
        let owned = temp.to_path_buf();
        temp.close()?;
        info!("Removed temporary file {}", owned.display());
        Ok(owned)
    }
}

impl Drop for CsvArtifact {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        match self.policy {
            CleanupPolicy::OnSuccess => match path.keep() {
                Ok(kept) => warn!("Export did not complete, keeping {}", kept.display()),
                Err(err) => warn!("Failed to keep temporary file: {}", err),
            },
            CleanupPolicy::Always => {
                let shown = path.display().to_string();
                match path.close() {
                    Ok(()) => info!("Removed temporary file {}", shown),
                    Err(err) => warn!("Failed to remove temporary file {}: {}", shown, err),
                }
            }
        }
    }
}
