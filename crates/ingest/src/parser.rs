use chrono::{DateTime, Utc};
use dashboard_core::UsageSample;
use serde_json::{Map, Value};

/// Nesting depth past which the usage search gives up on a record.
pub const MAX_SEARCH_DEPTH: usize = 64;

fn is_usage_shape(usage: &Map<String, Value>) -> bool {
    usage.contains_key("input") || usage.contains_key("cacheRead")
}

/// Depth-first search for a nested `usage` object carrying `input` or
/// `cacheRead`. The current level is checked before its children; the first
/// match in traversal order wins.
pub fn find_usage(value: &Value) -> Option<&Map<String, Value>> {
    find_usage_at(value, 0)
}

fn find_usage_at(value: &Value, depth: usize) -> Option<&Map<String, Value>> {
    if depth > MAX_SEARCH_DEPTH {
        return None;
    }
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(usage)) = map.get("usage")
                && is_usage_shape(usage)
            {
                return Some(usage);
            }
            map.values()
                .find_map(|child| find_usage_at(child, depth + 1))
        }
        Value::Array(items) => items
            .iter()
            .find_map(|item| find_usage_at(item, depth + 1)),
        _ => None,
    }
}

fn value_to_u64(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    value
        .as_f64()
        .filter(|count| count.is_finite() && *count >= 0.0)
        .map(|count| count.round() as u64)
}

pub fn usage_sample_from_object(usage: &Map<String, Value>) -> UsageSample {
    let field = |key: &str| usage.get(key).and_then(value_to_u64);
    UsageSample::from_parts(
        field("input"),
        field("cacheRead"),
        field("cacheWrite"),
        field("output"),
    )
}

pub(crate) fn parse_json_line(line: &str) -> Option<Value> {
    serde_json::from_str(line).ok()
}

pub fn extract_usage_from_line(line: &str) -> Option<UsageSample> {
    let value = parse_json_line(line.trim())?;
    find_usage(&value).map(usage_sample_from_object)
}

pub(crate) fn find_value<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    for path in paths {
        let mut current = value;
        let mut ok = true;
        for key in *path {
            if let Some(next) = current.get(*key) {
                current = next;
            } else {
                ok = false;
                break;
            }
        }
        if ok && !current.is_null() {
            return Some(current);
        }
    }
    None
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(DateTime::<Utc>::from_naive_utc_and_offset(parsed, Utc));
    }
    if let Ok(parsed) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(DateTime::<Utc>::from_naive_utc_and_offset(parsed, Utc));
    }
    if !raw.is_empty()
        && raw.chars().all(|ch| ch.is_ascii_digit())
        && let Ok(value) = raw.parse::<i64>()
    {
        // Ten digits or fewer are epoch seconds, longer values epoch millis.
        let (secs, nanos) = if raw.len() > 10 {
            (
                value / 1000,
                (value % 1000).unsigned_abs() as u32 * 1_000_000,
            )
        } else {
            (value, 0)
        };
        return DateTime::<Utc>::from_timestamp(secs, nanos);
    }
    None
}

/// Reads a timestamp stored either as a string or as epoch seconds/millis.
pub fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_timestamp(raw.trim()),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.round() as i64))
            .and_then(|value| parse_timestamp(&value.to_string())),
        _ => None,
    }
}
