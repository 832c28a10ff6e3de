//! Raw cell text to typed values
//!
//! Coercion never fails: null tokens become `Null`, unparsable dates become
//! `Null` (the missing-date check reports them), and unparsable numbers stay
//! text.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use datacheck_core::{ColumnKind, Value};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerce one cell according to its column kind
pub fn coerce_cell(raw: &str, kind: ColumnKind, null_tokens: &[String]) -> Value {
    if null_tokens.iter().any(|token| token == raw) {
        return Value::Null;
    }

    match kind {
        ColumnKind::Text => Value::Text(raw.to_string()),
        ColumnKind::Number => match parse_number(raw) {
            Some(n) => Value::Number(n),
            None => Value::Text(raw.to_string()),
        },
        ColumnKind::DateTime => parse_datetime(raw).map_or(Value::Null, Value::DateTime),
    }
}

/// Parse a finite number, ignoring surrounding whitespace
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a date or date/time; date-only values land on midnight
///
/// Values with an explicit offset are converted to local time so they
/// compare against the run's local "now".
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}
