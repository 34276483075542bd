use crate::sql::mysql::data_type::{ColumnKind, MySqlColumnKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use mysql_async::{Row as MySqlRow, Value as MySqlValue, from_value_opt, prelude::FromValue};
use std::fmt;
use tracing::warn;

pub struct DbRow<'a>(pub &'a MySqlRow);

impl DbRow<'_> {
    pub fn to_row_data(&self, table: &str) -> RowData {
        let fields = self
            .0
            .columns_ref()
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let name = column.name_str().into_owned();
                let value = match self.0.as_ref(idx) {
                    Some(raw) => decode_value(raw, column.kind(), &name),
                    None => Value::Null,
                };
                FieldValue::new(name, value)
            })
            .collect();

        RowData::new(table, fields)
    }
}

/// Decodes one cell according to its column kind. Values the typed
/// conversion rejects (zero dates, out-of-range numbers) are kept as their
/// raw text.
pub fn decode_value(raw: &MySqlValue, kind: ColumnKind, name: &str) -> Value {
    if let MySqlValue::NULL = raw {
        return Value::Null;
    }

    let typed = match kind {
        ColumnKind::Int => convert::<i64>(raw).map(Value::Int),
        ColumnKind::Uint => convert::<u64>(raw).map(Value::Uint),
        ColumnKind::Float => convert::<f64>(raw).map(Value::Float),
        ColumnKind::Decimal => convert::<String>(raw).map(Value::Decimal),
        ColumnKind::Date => convert::<NaiveDate>(raw).map(Value::Date),
        ColumnKind::Timestamp => convert::<NaiveDateTime>(raw)
            .map(|naive| Value::Timestamp(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))),
        ColumnKind::Time => parse_time(raw).map(Value::Time),
        ColumnKind::Json => convert::<serde_json::Value>(raw).map(Value::Json),
        ColumnKind::Bytes => convert::<Vec<u8>>(raw).map(Value::Bytes),
        ColumnKind::Text => convert::<String>(raw).map(Value::String),
        ColumnKind::Null => Some(Value::Null),
    };

    typed.unwrap_or_else(|| {
        warn!("Column '{}' could not be decoded as {:?}, keeping raw text", name, kind);
        Value::String(raw_text(raw))
    })
}

fn convert<T: FromValue>(raw: &MySqlValue) -> Option<T> {
    from_value_opt::<T>(raw.clone()).ok()
}

/// TIME cells arrive as `[-]H:MM:SS[.ffffff]` text over the text protocol and
/// as a decomposed `Time` value over the binary protocol.
fn parse_time(raw: &MySqlValue) -> Option<TimeDelta> {
    let (negative, hours, minutes, seconds, micros) = match raw {
        MySqlValue::Time(neg, days, h, m, s, us) => (
            *neg,
            i64::from(*days) * 24 + i64::from(*h),
            i64::from(*m),
            i64::from(*s),
            i64::from(*us),
        ),
        MySqlValue::Bytes(bytes) => parse_time_text(std::str::from_utf8(bytes).ok()?)?,
        _ => return None,
    };

    let total = ((hours * 60 + minutes) * 60 + seconds) * 1_000_000 + micros;
    Some(TimeDelta::microseconds(if negative { -total } else { total }))
}

fn parse_time_text(text: &str) -> Option<(bool, i64, i64, i64, i64)> {
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (clock, fraction) = text.split_once('.').unwrap_or((text, ""));

    let mut parts = clock.split(':');
    let mut next = || -> Option<i64> {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        part.parse().ok()
    };
    let (hours, minutes, seconds) = (next()?, next()?, next()?);
    if parts.next().is_some() || minutes > 59 || seconds > 59 {
        return None;
    }

    let micros = match fraction {
        "" => 0,
        f if f.len() <= 6 && f.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{f:0<6}").parse().ok()?
        }
        _ => return None,
    };

    Some((negative, hours, minutes, seconds, micros))
}

/// Textual form of a raw driver value.
fn raw_text(value: &MySqlValue) -> String {
    match value {
        MySqlValue::NULL => String::new(),
        MySqlValue::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        MySqlValue::Int(v) => v.to_string(),
        MySqlValue::UInt(v) => v.to_string(),
        MySqlValue::Float(v) => v.to_string(),
        MySqlValue::Double(v) => v.to_string(),
        MySqlValue::Date(y, m, d, h, mi, s, _) => {
            format!("{y:04}-{m:02}-{d:02} {h:02}:{mi:02}:{s:02}")
        }
        MySqlValue::Time(neg, days, h, mi, s, _) => {
            let sign = if *neg { "-" } else { "" };
            let hours = *days * 24 + u32::from(*h);
            format!("{sign}{hours:02}:{mi:02}:{s:02}")
        }
    }
}

impl fmt::Debug for DbRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
