mod parser;
mod paths;
mod session;
mod tail;
mod types;
mod usage;

pub use parser::{
    MAX_SEARCH_DEPTH, extract_usage_from_line, find_usage, parse_timestamp,
    timestamp_from_value, usage_sample_from_object,
};
pub use paths::{default_openclaw_home, session_log_path};
pub use session::{file_created_at, session_start_from_log};
pub use tail::{read_first_line, read_tail_lines, read_to_string, run_exclusive, run_with_timeout};
pub use types::{DEFAULT_READ_TIMEOUT, DEFAULT_TAIL_LINES, IngestError, Result};
pub use usage::{latest_usage_from_lines, latest_usage_from_log};
