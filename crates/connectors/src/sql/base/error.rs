use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The driver could not establish a session (bad credentials,
    /// unreachable host, wrong port).
    #[error("Failed to connect to MySQL at {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: mysql_async::Error,
    },

    /// The server rejected or failed the statement (unknown table or
    /// column, permission denied).
    #[error("Error extracting data from {table}: {source}")]
    Query {
        table: String,
        #[source]
        source: mysql_async::Error,
    },

    /// Closing the session failed.
    #[error("Failed to close MySQL connection: {0}")]
    Disconnect(#[source] mysql_async::Error),

    /// A table or column name is not a bare SQL identifier.
    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    /// An error occurred while building a SQL query.
    #[error("Query build error: {0}")]
    QueryBuildError(String),
}
