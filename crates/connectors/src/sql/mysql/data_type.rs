use mysql_async::{
    Column,
    consts::{ColumnFlags, ColumnType},
};

/// Collation id MySQL reports for binary strings and blobs.
const BINARY_CHARSET: u16 = 63;

/// How a MySQL result column is decoded into a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Uint,
    Float,
    Decimal,
    Date,
    Timestamp,
    Time,
    Json,
    Bytes,
    Text,
    Null,
}

pub trait MySqlColumnKind {
    fn kind(&self) -> ColumnKind;
}

impl MySqlColumnKind for Column {
    fn kind(&self) -> ColumnKind {
        column_kind(
            self.column_type(),
            self.flags().contains(ColumnFlags::UNSIGNED_FLAG),
            self.character_set() == BINARY_CHARSET,
        )
    }
}

pub fn column_kind(column_type: ColumnType, unsigned: bool, binary: bool) -> ColumnKind {
    use ColumnType::*;

    match column_type {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_INT24 | MYSQL_TYPE_LONG
        | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => {
            if unsigned {
                ColumnKind::Uint
            } else {
                ColumnKind::Int
            }
        }
        MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => ColumnKind::Float,
        MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => ColumnKind::Decimal,
        MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => ColumnKind::Date,
        MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2 | MYSQL_TYPE_TIMESTAMP
        | MYSQL_TYPE_TIMESTAMP2 => ColumnKind::Timestamp,
        MYSQL_TYPE_TIME | MYSQL_TYPE_TIME2 => ColumnKind::Time,
        MYSQL_TYPE_JSON => ColumnKind::Json,
        MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => ColumnKind::Bytes,
        MYSQL_TYPE_TINY_BLOB | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_LONG_BLOB | MYSQL_TYPE_BLOB
        | MYSQL_TYPE_STRING | MYSQL_TYPE_VAR_STRING | MYSQL_TYPE_VARCHAR => {
            if binary {
                ColumnKind::Bytes
            } else {
                ColumnKind::Text
            }
        }
        MYSQL_TYPE_NULL => ColumnKind::Null,
        _ => ColumnKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_signedness() {
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_LONGLONG, false, false),
            ColumnKind::Int
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_LONG, true, false),
            ColumnKind::Uint
        );
    }

    #[test]
    fn test_temporal_kinds() {
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_DATETIME, false, false),
            ColumnKind::Timestamp
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_TIMESTAMP, false, false),
            ColumnKind::Timestamp
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_DATE, false, false),
            ColumnKind::Date
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_TIME, false, false),
            ColumnKind::Time
        );
    }

    #[test]
    fn test_strings_vs_binary() {
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_VAR_STRING, false, false),
            ColumnKind::Text
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_BLOB, false, true),
            ColumnKind::Bytes
        );
        assert_eq!(
            column_kind(ColumnType::MYSQL_TYPE_NEWDECIMAL, false, false),
            ColumnKind::Decimal
        );
    }
}
