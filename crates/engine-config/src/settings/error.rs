use thiserror::Error;

/// Errors raised while resolving the export settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The .env file could not be read or parsed.
    #[error("Env file error: {0}")]
    EnvFile(String),

    /// DB_PORT is not a valid TCP port.
    #[error("Invalid database port '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// EXPORT_CLEANUP holds an unknown policy name.
    #[error("Invalid cleanup policy: {0} (expected 'on-success' or 'always')")]
    InvalidCleanupPolicy(String),
}
