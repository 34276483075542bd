use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::{core::identifiers::TableSpec, records::row::RowData};

/// A database session rows can be read from.
#[async_trait]
pub trait RowSource: Send {
    /// Runs `SELECT <columns> FROM <table>` and returns every row, each one
    /// holding its fields in the order of `table.columns`.
    async fn extract(&mut self, table: &TableSpec) -> Result<Vec<RowData>, DbError>;
}
