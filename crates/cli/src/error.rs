use engine_config::settings::error::SettingsError;
use engine_runtime::error::ExportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Export(#[from] ExportError),
}

impl CliError {
    pub fn stage(&self) -> &'static str {
        match self {
            CliError::Settings(_) => "config",
            CliError::Export(err) => err.stage(),
        }
    }
}
