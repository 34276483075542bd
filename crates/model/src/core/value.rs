use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// Format used for timestamp cells in exported files.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format used for date cells in exported files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    /// DECIMAL/NUMERIC columns, kept as the exact text the server sent.
    Decimal(String),
    String(String),
    Json(serde_json::Value),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    /// TIME columns are signed durations and may exceed one day.
    Time(TimeDelta),
    Timestamp(DateTime<Utc>),
    Null,
}

impl Value {
    /// Renders the value the way it appears inside a CSV cell.
    ///
    /// Nulls render as empty cells. Floats and durations follow Python's
    /// `str()` notation (`1.0`, `1e+16`, `1 day, 2:03:04`).
    pub fn to_csv_field(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Uint(v) => v.to_string(),
            Value::Float(v) => format_float(*v),
            Value::Decimal(v) | Value::String(v) => v.clone(),
            Value::Json(v) => v.to_string(),
            Value::Bytes(v) => String::from_utf8_lossy(v).into_owned(),
            Value::Date(v) => v.format(DATE_FORMAT).to_string(),
            Value::Time(v) => format_duration(v),
            Value::Timestamp(v) => v.format(TIMESTAMP_FORMAT).to_string(),
            Value::Null => String::new(),
        }
    }
}

/// Shortest round-trip digits from `ryu`, laid out in positional notation
/// when the decimal point falls within `(-4, 16]` and in exponent form (`d.ddde+XX`)
/// otherwise.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let mut buffer = ryu::Buffer::new();
    let shortest = buffer.format_finite(v);
    let (sign, unsigned) = match shortest.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", shortest),
    };
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = format!("{whole}{fraction}");
    let significant = all_digits.trim_start_matches('0');
    let leading_zeros = (all_digits.len() - significant.len()) as i32;
    let digits = significant.trim_end_matches('0');
    if digits.is_empty() {
        return format!("{sign}0.0");
    }

    // Position of the decimal point relative to the first significant digit
    let point = whole.len() as i32 + exponent - leading_zeros;
    let len = digits.len() as i32;

    let body = if point > -4 && point <= 16 {
        if point <= 0 {
            format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
        } else if point >= len {
            format!("{digits}{}.0", "0".repeat((point - len) as usize))
        } else {
            let (int_part, frac_part) = digits.split_at(point as usize);
            format!("{int_part}.{frac_part}")
        }
    } else {
        let (first, rest) = digits.split_at(1);
        let exp = point - 1;
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{first}e{exp_sign}{:02}", exp.unsigned_abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{:02}", exp.unsigned_abs())
        }
    };

    format!("{sign}{body}")
}

/// `[-]N day[s], H:MM:SS[.ffffff]`, with whole days floored so the clock
/// part is never negative.
fn format_duration(delta: &TimeDelta) -> String {
    let total = delta.num_seconds() * MICROS_PER_SECOND + i64::from(delta.subsec_nanos() / 1_000);
    let days = total.div_euclid(MICROS_PER_DAY);
    let rem = total.rem_euclid(MICROS_PER_DAY);
    let (secs, micros) = (rem / MICROS_PER_SECOND, rem % MICROS_PER_SECOND);

    let mut clock = format!("{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
    if micros != 0 {
        clock.push_str(&format!(".{micros:06}"));
    }

    match days {
        0 => clock,
        1 | -1 => format!("{days} day, {clock}"),
        _ => format!("{days} days, {clock}"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

impl FieldValue {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_csv_field_scalars() {
        assert_eq!(Value::Int(-7).to_csv_field(), "-7");
        assert_eq!(Value::Uint(42).to_csv_field(), "42");
        assert_eq!(Value::Null.to_csv_field(), "");
        assert_eq!(Value::Decimal("10.50".into()).to_csv_field(), "10.50");
        assert_eq!(Value::Bytes(b"raw".to_vec()).to_csv_field(), "raw");
    }

    #[test]
    fn test_csv_field_floats() {
        assert_eq!(Value::Float(1.0).to_csv_field(), "1.0");
        assert_eq!(Value::Float(0.25).to_csv_field(), "0.25");
        assert_eq!(Value::Float(-123.456).to_csv_field(), "-123.456");
        assert_eq!(Value::Float(0.0001).to_csv_field(), "0.0001");
        assert_eq!(Value::Float(-0.0).to_csv_field(), "-0.0");
        assert_eq!(Value::Float(f64::NAN).to_csv_field(), "nan");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_csv_field(), "-inf");
    }

    #[test]
    fn test_csv_field_float_exponents() {
        assert_eq!(Value::Float(1e15).to_csv_field(), "1000000000000000.0");
        assert_eq!(Value::Float(1e16).to_csv_field(), "1e+16");
        assert_eq!(
            Value::Float(1.2345678901234568e17).to_csv_field(),
            "1.2345678901234568e+17"
        );
        assert_eq!(Value::Float(1e-5).to_csv_field(), "1e-05");
        assert_eq!(Value::Float(2.5e-7).to_csv_field(), "2.5e-07");
        assert_eq!(Value::Float(1e300).to_csv_field(), "1e+300");
    }

    #[test]
    fn test_csv_field_temporal() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 11, 30, 0).unwrap();
        assert_eq!(Value::Timestamp(ts).to_csv_field(), "2024-01-02 11:30:00");

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(Value::Date(date).to_csv_field(), "2024-03-09");
    }

    #[test]
    fn test_csv_field_durations() {
        let time = |h: i64, m: i64, s: i64| {
            Value::Time(TimeDelta::hours(h) + TimeDelta::minutes(m) + TimeDelta::seconds(s))
        };

        assert_eq!(time(9, 5, 0).to_csv_field(), "9:05:00");
        assert_eq!(time(0, 0, 0).to_csv_field(), "0:00:00");
        assert_eq!(time(26, 3, 4).to_csv_field(), "1 day, 2:03:04");
        assert_eq!(time(50, 0, 0).to_csv_field(), "2 days, 2:00:00");
        assert_eq!(time(0, 0, -1).to_csv_field(), "-1 day, 23:59:59");
        assert_eq!(time(-838, -59, -59).to_csv_field(), "-35 days, 1:00:01");
        assert_eq!(
            Value::Time(TimeDelta::microseconds(1_500_000)).to_csv_field(),
            "0:00:01.500000"
        );
    }
}
