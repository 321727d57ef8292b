use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Trailing session log lines examined when looking for usage.
pub const DEFAULT_TAIL_LINES: usize = 20;

/// Upper bound on any single log or registry read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors emitted while reading session artifacts.
#[derive(Debug)]
pub enum IngestError {
    Io(io::Error),
    Timeout(Duration),
    /// An earlier read of the same path has not returned yet.
    Busy(PathBuf),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Timeout(limit) => write!(f, "read timed out after {}ms", limit.as_millis()),
            Self::Busy(path) => write!(f, "previous read of {} still pending", path.display()),
        }
    }
}

impl std::error::Error for IngestError {}

impl From<io::Error> for IngestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
