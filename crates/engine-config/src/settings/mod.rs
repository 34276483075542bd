use crate::settings::{
    connection::ConnectionSettings, env::EnvManager, error::SettingsError,
    storage::StorageSettings,
};
use chrono::{Local, NaiveDateTime};
use std::{fmt, path::PathBuf, str::FromStr};
use tracing::debug;

pub mod connection;
pub mod env;
pub mod error;
pub mod storage;

pub const ENV_EXPORT_CLEANUP: &str = "EXPORT_CLEANUP";
pub const ENV_EXPORT_WORK_DIR: &str = "EXPORT_WORK_DIR";

pub const DEFAULT_BUCKET: &str = "proy-cloud-bucket";
pub const DEFAULT_PREFIX: &str = "Auth";

/// Format of the run timestamp embedded in destination keys.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Where exported files are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationSettings {
    pub bucket: String,
    pub prefix: String,
}

impl Default for DestinationSettings {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Local wall-clock time captured once when the process starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunTimestamp(NaiveDateTime);

impl RunTimestamp {
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    pub fn from_naive(ts: NaiveDateTime) -> Self {
        Self(ts)
    }
}

impl fmt::Display for RunTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RUN_TIMESTAMP_FORMAT))
    }
}

/// What happens to the local CSV artifact when a run fails after writing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupPolicy {
    /// Delete only after a successful upload; failed runs leave the file behind.
    #[default]
    OnSuccess,
    /// Delete on every exit path.
    Always,
}

impl FromStr for CleanupPolicy {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on-success" | "on_success" | "success" => Ok(CleanupPolicy::OnSuccess),
            "always" => Ok(CleanupPolicy::Always),
            other => Err(SettingsError::InvalidCleanupPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupPolicy::OnSuccess => write!(f, "on-success"),
            CleanupPolicy::Always => write!(f, "always"),
        }
    }
}

/// Immutable configuration for one export run, built once at startup and
/// passed by reference to every stage.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub connection: ConnectionSettings,
    pub destination: DestinationSettings,
    pub storage: StorageSettings,
    pub run_timestamp: RunTimestamp,
    pub cleanup: CleanupPolicy,
    /// Directory the temporary CSV file is created in.
    pub work_dir: PathBuf,
}

impl ExportSettings {
    pub fn from_env(env: &EnvManager, run_timestamp: RunTimestamp) -> Result<Self, SettingsError> {
        for key in [
            connection::ENV_DB_HOST,
            connection::ENV_DB_USER,
            connection::ENV_DB_PASSWORD,
            connection::ENV_DB_NAME,
            connection::ENV_DB_PORT,
            storage::ENV_AWS_ACCESS_KEY_ID,
            storage::ENV_AWS_SECRET_ACCESS_KEY,
            storage::ENV_AWS_REGION,
            storage::ENV_AWS_DEFAULT_REGION,
            storage::ENV_AWS_ENDPOINT_URL_S3,
        ] {
            match env.display_value(key) {
                Some(value) => debug!("{key}={value}"),
                None => debug!("{key} not set, using default"),
            }
        }

        let cleanup = match env.get(ENV_EXPORT_CLEANUP) {
            Some(value) => value.parse()?,
            None => CleanupPolicy::default(),
        };

        let work_dir = env
            .get(ENV_EXPORT_WORK_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);

        Ok(Self {
            connection: ConnectionSettings::from_env(env)?,
            destination: DestinationSettings::default(),
            storage: StorageSettings::from_env(env),
            run_timestamp,
            cleanup,
            work_dir,
        })
    }

    /// `<prefix>/<table>_<run timestamp>.csv`
    pub fn destination_key(&self, table: &str) -> String {
        format!(
            "{}/{}_{}.csv",
            self.destination.prefix, table, self.run_timestamp
        )
    }

    pub fn bucket(&self) -> &str {
        &self.destination.bucket
    }
}
