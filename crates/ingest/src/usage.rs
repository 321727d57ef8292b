use std::path::Path;
use std::time::Duration;

use dashboard_core::UsageSample;
use tracing::debug;

use crate::parser::extract_usage_from_line;
use crate::tail::read_tail_lines;

/// Scans lines newest-first (input is oldest-first) and returns the first
/// usage found. Unparsable lines are skipped.
pub fn latest_usage_from_lines<I, S>(lines: I) -> Option<UsageSample>
where
    I: IntoIterator<Item = S>,
    I::IntoIter: DoubleEndedIterator,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .rev()
        .find_map(|line| extract_usage_from_line(line.as_ref()))
}

/// Latest usage from the trailing `max_lines` of a session log. A missing,
/// unreadable or slow log yields `None`.
pub fn latest_usage_from_log(
    path: &Path,
    max_lines: usize,
    timeout: Duration,
) -> Option<UsageSample> {
    if !path.exists() {
        debug!("session log not found at {}", path.display());
        return None;
    }
    match read_tail_lines(path, max_lines, timeout) {
        Ok(lines) => latest_usage_from_lines(lines),
        Err(err) => {
            debug!("session log unavailable at {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_usage() {
        let lines: Vec<String> = Vec::new();
        assert!(latest_usage_from_lines(lines).is_none());
    }

    #[test]
    fn unparsable_lines_have_no_usage() {
        let lines = ["not json", "{\"usage\":", "", "]]"];
        assert!(latest_usage_from_lines(lines).is_none());
    }

    #[test]
    fn picks_newest_usage_bearing_line() {
        let lines = [
            r#"{"usage":{"input":1,"cacheRead":1}}"#,
            r#"{"usage":{"input":100,"cacheRead":50}}"#,
            r#"{"type":"tool_result","content":"ok"}"#,
            r#"{"usage":{"output":12}}"#,
        ];
        let usage = latest_usage_from_lines(lines).expect("usage");
        assert_eq!(usage.context, 150);
        assert_eq!(usage.input, Some(100));
    }

    #[test]
    fn torn_trailing_write_is_skipped() {
        let lines = [
            r#"{"message":{"usage":{"input":10,"cacheWrite":5}}}"#,
            r#"{"message":{"usage":{"inp"#,
        ];
        let usage = latest_usage_from_lines(lines).expect("usage");
        assert_eq!(usage.context, 15);
    }
}
