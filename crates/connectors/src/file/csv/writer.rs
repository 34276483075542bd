use crate::file::csv::error::FileError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use model::{
    core::value::{TIMESTAMP_FORMAT, Value},
    records::row::RowData,
};
use std::{fs::File, io::Write, path::Path};
use tracing::info;

/// Normalizes one cell: timestamps become `YYYY-MM-DD HH:MM:SS` strings,
/// everything else is returned unchanged.
pub fn format_value(value: &Value) -> Value {
    match value {
        Value::Timestamp(ts) => Value::String(ts.format(TIMESTAMP_FORMAT).to_string()),
        other => other.clone(),
    }
}

pub fn format_rows(rows: &[RowData]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| row.values().map(format_value).collect())
        .collect()
}

/// Writes a header line followed by one record per row to `path`,
/// truncating any existing content. Records end in `\r\n` and fields are
/// quoted only when they contain a delimiter, quote or line break.
/// Returns the number of data records.
pub fn write_csv<P: AsRef<Path>>(
    rows: &[RowData],
    columns: &[&str],
    path: P,
) -> Result<usize, FileError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let written = write_records(file, rows, columns)?;
    info!("Saved {} rows to {}", written, path.display());
    Ok(written)
}

pub fn write_records<W: Write>(
    writer: W,
    rows: &[RowData],
    columns: &[&str],
) -> Result<usize, FileError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    writer.write_record(columns)?;

    let formatted = format_rows(rows);
    for (idx, row) in formatted.iter().enumerate() {
        if row.len() != columns.len() {
            return Err(FileError::FieldCount {
                row: idx,
                expected: columns.len(),
                actual: row.len(),
            });
        }
        writer.write_record(row.iter().map(Value::to_csv_field))?;
    }

    writer.flush()?;
    Ok(formatted.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use model::core::{identifiers::USERS, value::FieldValue};

    fn user(id: i64, name: &str, role: &str, created_at: (u32, u32, u32, u32)) -> RowData {
        let (month, day, hour, minute) = created_at;
        let values = vec![
            Value::Int(id),
            Value::String(name.to_string()),
            Value::String(format!("{}@x.com", name.to_lowercase())),
            Value::String(format!("h{id}")),
            Value::String(role.to_string()),
            Value::String(format!("t{id}")),
            Value::Timestamp(
                Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0)
                    .unwrap(),
            ),
        ];
        RowData::new(
            USERS.name,
            USERS
                .columns
                .iter()
                .zip(values)
                .map(|(c, v)| FieldValue::new(*c, v))
                .collect(),
        )
    }

    fn users() -> Vec<RowData> {
        vec![
            user(1, "Ana", "user", (1, 1, 10, 0)),
            user(2, "Bo", "admin", (1, 2, 11, 30)),
        ]
    }

    #[test]
    fn test_users_body_is_exact() {
        let mut out = Vec::new();
        let written = write_records(&mut out, &users(), USERS.columns).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,nombre,email,password,role,token,created_at\r\n\
             1,Ana,ana@x.com,h1,user,t1,2024-01-01 10:00:00\r\n\
             2,Bo,bo@x.com,h2,admin,t2,2024-01-02 11:30:00\r\n"
        );
    }

    #[test]
    fn test_format_rows_is_idempotent() {
        let once = format_rows(&users());
        let twice: Vec<Vec<Value>> = once
            .iter()
            .map(|row| row.iter().map(format_value).collect())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_timestamps_match_fixed_pattern() {
        let samples = [
            Utc.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap(),
            Utc.timestamp_opt(1_700_000_000, 987_654_321).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_micro_opt(0, 0, 0, 1)
                .unwrap()
                .and_utc(),
        ];

        for ts in samples {
            let Value::String(s) = format_value(&Value::Timestamp(ts)) else {
                panic!("timestamp was not formatted");
            };
            assert_eq!(s.len(), 19, "{s}");
            let bytes = s.as_bytes();
            for (i, b) in bytes.iter().enumerate() {
                match i {
                    4 | 7 => assert_eq!(*b, b'-'),
                    10 => assert_eq!(*b, b' '),
                    13 | 16 => assert_eq!(*b, b':'),
                    _ => assert!(b.is_ascii_digit(), "{s}"),
                }
            }
        }
    }

    #[test]
    fn test_non_timestamps_pass_through() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for value in [
            Value::Int(5),
            Value::Null,
            Value::Date(date),
            Value::String("2024-01-01T10:00:00".into()),
        ] {
            assert_eq!(format_value(&value), value);
        }
    }

    #[test]
    fn test_quoting_and_round_trip() {
        let rows = vec![RowData::new(
            "notes",
            vec![
                FieldValue::new("id", Value::Int(1)),
                FieldValue::new("body", Value::String("a, \"quoted\"\nline".into())),
                FieldValue::new("deleted_at", Value::Null),
            ],
        )];
        let columns = ["id", "body", "deleted_at"];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.csv");
        assert_eq!(write_csv(&rows, &columns, &path).unwrap(), 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"a, \"\"quoted\"\"\nline\""));
        assert!(raw.ends_with("\r\n"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, columns);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), rows.len());
        assert_eq!(&records[0][1], "a, \"quoted\"\nline");
        assert_eq!(&records[0][2], "");
    }

    #[test]
    fn test_empty_row_set_writes_header_only() {
        let mut out = Vec::new();
        assert_eq!(write_records(&mut out, &[], USERS.columns).unwrap(), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "id,nombre,email,password,role,token,created_at\r\n"
        );
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_csv(&users(), USERS.columns, &path).unwrap_err();
        assert!(matches!(err, FileError::IoError(_)));
    }
}
