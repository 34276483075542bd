use crate::{error::CliError, exit::ExitCode};
use clap::Parser;
use connectors::object_store::s3::S3Uploader;
use engine_config::settings::{ExportSettings, RunTimestamp, env::EnvManager};
use engine_runtime::execution::executor;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod exit;

#[derive(Parser)]
#[command(
    name = "auth-export",
    version = "0.0.1",
    about = "Exports the auth service users table to S3 as CSV"
)]
struct Cli {
    #[arg(long, default_value = ".env", help = "Env file merged into the process environment")]
    env_file: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    // Captured before anything else so every key of the run shares it
    let run_timestamp = RunTimestamp::now();

    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match export(cli, run_timestamp).await {
        Ok(()) => {
            info!("Export completed successfully");
            ExitCode::Success.into()
        }
        Err(err) => {
            error!(stage = err.stage(), "Export failed: {}", err);
            ExitCode::GeneralError.into()
        }
    }
}

async fn export(cli: Cli, run_timestamp: RunTimestamp) -> Result<(), CliError> {
    let mut env = EnvManager::new();
    env.load_from_file(&cli.env_file)?;

    let settings = ExportSettings::from_env(&env, run_timestamp)?;
    info!(
        "Run {} exporting to s3://{} (cleanup: {})",
        settings.run_timestamp,
        settings.bucket(),
        settings.cleanup
    );

    let store = S3Uploader::connect(settings.storage.s3_params()).await;
    let summary = executor::run(&settings, &store).await?;
    info!(
        "Exported {} rows of {} to s3://{}/{}",
        summary.rows, summary.table, summary.bucket, summary.key
    );

    Ok(())
}
