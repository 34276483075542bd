use crate::{error::ExportError, execution::artifact::CsvArtifact};
use connectors::{
    file::csv::{error::FileError, writer::write_csv},
    object_store::ObjectStore,
    sql::{
        base::source::RowSource,
        mysql::adapter::MySqlAdapter,
    },
};
use engine_config::settings::ExportSettings;
use model::core::identifiers::{TableSpec, USERS};
use tracing::{info, warn};

/// Outcome of exporting one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub table: String,
    pub rows: usize,
    pub bucket: String,
    pub key: String,
}

/// Connects to the auth database, exports the `users` table and closes the
/// connection.
pub async fn run<S>(settings: &ExportSettings, store: &S) -> Result<ExportSummary, ExportError>
where
    S: ObjectStore + ?Sized,
{
    info!("Starting auth service export");

    let mut adapter = MySqlAdapter::connect(&settings.connection.mysql_params()).await?;
    let result = process_table(&mut adapter, store, settings, &USERS).await;

    match result {
        Ok(summary) => {
            adapter.disconnect().await?;
            Ok(summary)
        }
        Err(err) => {
            if let Err(close_err) = adapter.disconnect().await {
                warn!("{}", close_err);
            }
            Err(err)
        }
    }
}

/// Extracts `table`, writes it to a temporary CSV file, uploads the file
/// and deletes it. Each stage starts only after the previous one succeeded.
pub async fn process_table<R, S>(
    source: &mut R,
    store: &S,
    settings: &ExportSettings,
    table: &TableSpec,
) -> Result<ExportSummary, ExportError>
where
    R: RowSource + ?Sized,
    S: ObjectStore + ?Sized,
{
    let rows = source.extract(table).await?;
    info!("Extracted {} rows from {}", rows.len(), table);

    let artifact = CsvArtifact::create(&settings.work_dir, table.name, settings.cleanup)
        .map_err(|err| ExportError::Io {
            path: settings.work_dir.display().to_string(),
            source: FileError::IoError(err),
        })?;

    let written = write_csv(&rows, table.columns, artifact.path()).map_err(|source| {
        ExportError::Io {
            path: artifact.path().display().to_string(),
            source,
        }
    })?;

    let key = settings.destination_key(table.name);
    store.upload(artifact.path(), settings.bucket(), &key).await?;

    let path = artifact.path().display().to_string();
    artifact
        .remove()
        .map_err(|source| ExportError::Cleanup { path, source })?;

    info!("Table {} processed successfully", table);
    Ok(ExportSummary {
        table: table.name.to_string(),
        rows: written,
        bucket: settings.bucket().to_string(),
        key,
    })
}
