use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Row {row} has {actual} fields, expected {expected}")]
    FieldCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
