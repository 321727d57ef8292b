use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::parser::{find_value, parse_json_line, timestamp_from_value};
use crate::tail::read_first_line;

/// Creation time of a file, falling back to its modification time on
/// platforms that do not record birth times.
pub fn file_created_at(path: &Path) -> Option<String> {
    let metadata = std::fs::metadata(path).ok()?;
    let created = metadata.created().or_else(|_| metadata.modified()).ok()?;
    Some(DateTime::<Utc>::from(created).to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Start time of a session: the `timestamp` (or `ts`) of the first log record,
/// else the creation time of the log itself.
pub fn session_start_from_log(path: &Path, timeout: Duration) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match read_first_line(path, timeout) {
        Ok(Some(line)) => {
            let start = parse_json_line(line.trim()).and_then(|value| {
                find_value(&value, &[&["timestamp"], &["ts"]])
                    .and_then(timestamp_from_value)
                    .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            });
            if start.is_some() {
                return start;
            }
        }
        Ok(None) => {}
        Err(err) => {
            debug!("session log head unavailable for {}: {}", path.display(), err);
        }
    }
    file_created_at(path)
}
