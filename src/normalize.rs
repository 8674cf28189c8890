use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::error::InputError;
use crate::VideoMetrics;

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl VideoMetrics {
    /// Builds metrics from a loosely typed record. Only a non-object input is
    /// rejected; every individual field degrades to its default instead.
    pub fn from_record(record: &Value) -> Result<Self, InputError> {
        let map = match record {
            Value::Object(map) => map,
            other => {
                let found = value_kind(other);
                warn!(found, "rejecting non-object video record");
                return Err(InputError::NotARecord { found });
            }
        };

        Ok(Self {
            title: text_field(map.get("title")),
            description: text_field(map.get("description")),
            channel: text_field(map.get("channel")),
            category: text_field(map.get("category")),
            view_count: parse_count(map.get("view_count")),
            like_count: parse_count(map.get("like_count")),
            comment_count: parse_count(map.get("comment_count")),
            published_at: parse_timestamp(map.get("published_at")),
        })
    }
}

/// Parses a raw count into a non-negative integer. Never fails: missing,
/// negative or non-numeric input becomes 0.
pub fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(number)) => {
            if let Some(count) = number.as_u64() {
                count
            } else if let Some(float) = number.as_f64() {
                float_to_count(float)
            } else {
                0
            }
        }
        Some(Value::String(raw)) => parse_count_str(raw),
        _ => 0,
    }
}

pub fn parse_count_str(raw: &str) -> u64 {
    let cleaned: String = raw
        .chars()
        .filter(|ch| *ch != ',' && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    if let Ok(count) = cleaned.parse::<u64>() {
        return count;
    }
    cleaned.parse::<f64>().map(float_to_count).unwrap_or(0)
}

fn float_to_count(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.floor() as u64
}

/// Parses `published_at` from an ISO-8601-like string or epoch seconds.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value {
        Some(Value::String(raw)) => parse_timestamp_str(raw),
        Some(Value::Number(number)) => number.as_f64().and_then(epoch_seconds),
        _ => None,
    }
}

pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    trimmed.parse::<f64>().ok().and_then(epoch_seconds)
}

fn epoch_seconds(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let secs = value.trunc() as i64;
    let nanos = ((value - value.trunc()) * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
