use crate::sql::base::error::DbError;
use model::core::identifiers::{TableSpec, is_plain_identifier};

/// A column-projected `SELECT` over a whole table.
///
/// Identifiers are interpolated into the statement text, not bound as
/// parameters, so rendering refuses anything that is not a bare identifier.
#[derive(Debug, Clone)]
pub struct SelectQuery<'a> {
    table: &'a str,
    columns: &'a [&'a str],
}

impl<'a> SelectQuery<'a> {
    pub fn new(table: &'a str, columns: &'a [&'a str]) -> Self {
        Self { table, columns }
    }

    pub fn for_table(spec: &'a TableSpec) -> Self {
        Self::new(spec.name, spec.columns)
    }

    pub fn render(&self) -> Result<String, DbError> {
        if self.columns.is_empty() {
            return Err(DbError::QueryBuildError(format!(
                "no columns requested for table {}",
                self.table
            )));
        }

        for ident in std::iter::once(&self.table).chain(self.columns.iter()) {
            if !is_plain_identifier(ident) {
                return Err(DbError::InvalidIdentifier(ident.to_string()));
            }
        }

        Ok(format!(
            "SELECT {} FROM {}",
            self.columns.join(", "),
            self.table
        ))
    }
}
