//! Scalar parsing and formatting shared by both wire formats.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

use crate::schema::{FieldKind, FieldValue, ValueError};

/// Timestamp layout older servers emit in the text format.
const LEGACY_TIMESTAMP: &str = "%Y/%m/%d %H:%M:%S %z";

/// A single wire value, already formatted for output.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Decimal(f64),
}

impl Scalar {
    /// Converts a scalar field value; `None` for non-scalar values.
    pub(crate) fn from_value(value: FieldValue) -> Option<Self> {
        Some(match value {
            FieldValue::Str(s) => Scalar::Str(s),
            FieldValue::Bool(b) => Scalar::Bool(b),
            FieldValue::Int(n) => Scalar::Int(n),
            FieldValue::Decimal(d) => Scalar::Decimal(d),
            FieldValue::Date(d) => Scalar::Str(format_date(d)),
            FieldValue::DateTime(t) => Scalar::Str(format_timestamp(t)),
            FieldValue::Reference(_) | FieldValue::Records(_) | FieldValue::Custom(_) => {
                return None;
            }
        })
    }

    /// Markup text form.
    pub(crate) fn text(&self) -> String {
        match self {
            Scalar::Str(s) => s.clone(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Decimal(d) => d.to_string(),
        }
    }

    /// Text format value.
    pub(crate) fn to_json(&self) -> Value {
        match self {
            Scalar::Str(s) => Value::String(s.clone()),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(n) => Value::from(*n),
            Scalar::Decimal(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
        }
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses markup text into a value of a scalar `kind`.
///
/// Strings are taken verbatim; everything else is trimmed first.
pub(crate) fn parse_text(kind: FieldKind, text: &str) -> Result<FieldValue, ValueError> {
    if kind == FieldKind::Str {
        return Ok(FieldValue::Str(text.to_string()));
    }
    let text = text.trim();
    match kind {
        FieldKind::Bool => parse_bool(text).map(FieldValue::Bool),
        FieldKind::Int => text
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| ValueError::new(format!("'{}' is not an integer", text))),
        FieldKind::Decimal => text
            .parse::<f64>()
            .map(FieldValue::Decimal)
            .map_err(|_| ValueError::new(format!("'{}' is not a decimal", text))),
        FieldKind::Date => parse_date(text).map(FieldValue::Date),
        FieldKind::DateTime => parse_timestamp(text).map(FieldValue::DateTime),
        _ => Err(ValueError::new(format!("{:?} is not a scalar kind", kind))),
    }
}

/// Converts a text-format value into a value of a scalar `kind`.
///
/// Numbers and booleans may also arrive as strings.
pub(crate) fn parse_json(kind: FieldKind, value: &Value) -> Result<FieldValue, ValueError> {
    match (kind, value) {
        (FieldKind::Str, Value::String(s)) => Ok(FieldValue::Str(s.clone())),
        (FieldKind::Str, Value::Number(n)) => Ok(FieldValue::Str(n.to_string())),
        (FieldKind::Str, Value::Bool(b)) => Ok(FieldValue::Str(b.to_string())),
        (FieldKind::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Int, Value::Number(n)) => n
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| ValueError::new(format!("{} is not an integer", n))),
        (FieldKind::Decimal, Value::Number(n)) => n
            .as_f64()
            .map(FieldValue::Decimal)
            .ok_or_else(|| ValueError::new(format!("{} is not a decimal", n))),
        (_, Value::String(s)) => parse_text(kind, s),
        (_, other) => Err(ValueError::new(format!(
            "cannot read {} as {:?}",
            json_type(other),
            kind
        ))),
    }
}

/// `true`/`false`/`1`/`0`, case-insensitive.
pub(crate) fn parse_bool(text: &str) -> Result<bool, ValueError> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ValueError::new(format!("'{}' is not a boolean", text))),
    }
}

/// `YYYY-MM-DD`, or the date part of a timestamp.
pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, ValueError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| parse_timestamp(text).map(|t| t.date_naive()))
        .map_err(|_| ValueError::new(format!("'{}' is not a date", text)))
}

/// RFC 3339, a bare date (midnight UTC), or the legacy
/// `YYYY/MM/DD HH:MM:SS ±zzzz` layout.
pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ValueError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(text, LEGACY_TIMESTAMP) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ValueError::new(format!("'{}' is not a timestamp", text)))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
