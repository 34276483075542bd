use crate::sql::{
    base::{error::DbError, query::select::SelectQuery, row::DbRow, source::RowSource},
    mysql::params::MySqlConnParams,
};
use async_trait::async_trait;
use model::{core::identifiers::TableSpec, records::row::RowData};
use mysql_async::{Conn, Row, prelude::Queryable};
use tracing::{debug, info};

/// A single MySQL session, opened once and used for one export.
pub struct MySqlAdapter {
    conn: Conn,
    target: String,
}

impl MySqlAdapter {
    pub async fn connect(params: &MySqlConnParams) -> Result<Self, DbError> {
        let target = params.target();
        let conn = Conn::new(params.opts())
            .await
            .map_err(|source| DbError::Connection {
                target: target.clone(),
                source,
            })?;

        info!("Connected to MySQL at {}", target);
        Ok(Self { conn, target })
    }

    pub async fn disconnect(self) -> Result<(), DbError> {
        self.conn.disconnect().await.map_err(DbError::Disconnect)?;
        debug!("Closed MySQL connection to {}", self.target);
        Ok(())
    }
}

#[async_trait]
impl RowSource for MySqlAdapter {
    async fn extract(&mut self, table: &TableSpec) -> Result<Vec<RowData>, DbError> {
        let sql = SelectQuery::for_table(table).render()?;
        info!("Executing query: {}", sql);

        let rows: Vec<Row> = self
            .conn
            .query(sql)
            .await
            .map_err(|source| DbError::Query {
                table: table.name.to_string(),
                source,
            })?;

        Ok(rows
            .iter()
            .map(|row| DbRow(row).to_row_data(table.name))
            .collect())
    }
}
