use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::thread;
use std::time::Duration;

use crate::types::{IngestError, Result};

const CHUNK_SIZE: u64 = 64 * 1024;
const MAX_TAIL_BYTES: u64 = 8 * 1024 * 1024;

/// Runs a blocking read on a helper thread and abandons it once `timeout`
/// elapses. An abandoned read keeps running in the background until the
/// underlying syscall returns.
pub fn run_with_timeout<T, F>(timeout: Duration, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> io::Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("artifact-read".to_string())
        .spawn(move || {
            let _ = tx.send(task());
        })?;
    match rx.recv_timeout(timeout) {
        Ok(result) => Ok(result?),
        Err(RecvTimeoutError::Timeout) => Err(IngestError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(IngestError::Io(io::Error::other(
            "reader thread exited without a result",
        ))),
    }
}

fn pending_reads() -> MutexGuard<'static, HashSet<PathBuf>> {
    static PENDING: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();
    PENDING
        .get_or_init(|| Mutex::new(HashSet::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a path as being read until dropped. The slot moves into the reader
/// thread, so a read abandoned on timeout keeps its path blocked until the
/// syscall finally returns.
struct ReadSlot(PathBuf);

impl ReadSlot {
    fn claim(path: &Path) -> Option<Self> {
        pending_reads()
            .insert(path.to_path_buf())
            .then(|| Self(path.to_path_buf()))
    }
}

impl Drop for ReadSlot {
    fn drop(&mut self) {
        pending_reads().remove(&self.0);
    }
}

/// Like [`run_with_timeout`], but at most one read per path is outstanding.
/// A hung file therefore pins one helper thread, not one per request.
pub fn run_exclusive<T, F>(path: &Path, timeout: Duration, task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Path) -> io::Result<T> + Send + 'static,
{
    let slot = ReadSlot::claim(path).ok_or_else(|| IngestError::Busy(path.to_path_buf()))?;
    run_with_timeout(timeout, move || {
        let result = task(&slot.0);
        drop(slot);
        result
    })
}

/// Returns the last `max_lines` lines of a file, oldest first.
pub fn read_tail_lines(path: &Path, max_lines: usize, timeout: Duration) -> Result<Vec<String>> {
    run_exclusive(path, timeout, move |path| tail_lines(path, max_lines))
}

pub fn read_first_line(path: &Path, timeout: Duration) -> Result<Option<String>> {
    run_exclusive(path, timeout, first_line)
}

pub fn read_to_string(path: &Path, timeout: Duration) -> Result<String> {
    run_exclusive(path, timeout, |path| std::fs::read_to_string(path))
}

fn count_line_breaks(bytes: &[u8]) -> usize {
    bytes.iter().filter(|byte| **byte == b'\n').count()
}

pub(crate) fn tail_lines(path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
    if max_lines == 0 {
        return Ok(Vec::new());
    }
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let floor = len.saturating_sub(MAX_TAIL_BYTES);

    let mut start = len;
    let mut buf: Vec<u8> = Vec::new();
    while start > floor {
        let next = start.saturating_sub(CHUNK_SIZE).max(floor);
        let mut chunk = vec![0u8; (start - next) as usize];
        file.seek(SeekFrom::Start(next))?;
        file.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&buf);
        buf = chunk;
        start = next;
        // One break more than requested guarantees the requested lines are whole.
        if count_line_breaks(&buf) > max_lines {
            break;
        }
    }

    let text = String::from_utf8_lossy(&buf);
    let mut lines: Vec<&str> = text.lines().collect();
    if start > 0 && !lines.is_empty() {
        lines.remove(0);
    }
    let skip = lines.len().saturating_sub(max_lines);
    Ok(lines[skip..].iter().map(|line| line.to_string()).collect())
}

fn first_line(path: &Path) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_lines(path: &Path, count: usize, width: usize) {
        let mut file = File::create(path).expect("create");
        for index in 0..count {
            writeln!(file, "{index:0width$}").expect("write");
        }
    }

    #[test]
    fn returns_trailing_lines_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.jsonl");
        write_lines(&path, 50, 4);

        let lines = tail_lines(&path, 3).expect("tail");
        assert_eq!(lines, vec!["0047", "0048", "0049"]);
    }

    #[test]
    fn short_files_return_every_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "a\nb").expect("write");

        let lines = tail_lines(&path, 20).expect("tail");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn reads_across_chunk_boundaries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.jsonl");
        // 5000 byte lines force several backwards chunk reads.
        write_lines(&path, 40, 4999);

        let lines = tail_lines(&path, 20).expect("tail");
        assert_eq!(lines.len(), 20);
        assert!(lines[0].ends_with("20"));
        assert!(lines[19].ends_with("39"));
        assert!(lines.iter().all(|line| line.len() == 4999));
    }

    #[test]
    fn empty_file_and_zero_window() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "").expect("write");

        assert!(tail_lines(&path, 5).expect("tail").is_empty());
        assert!(tail_lines(&path, 0).expect("tail").is_empty());
    }

    #[test]
    fn first_line_is_trimmed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("log.jsonl");
        std::fs::write(&path, "{\"ts\":1}\r\nsecond\n").expect("write");

        let line = read_first_line(&path, Duration::from_secs(1)).expect("read");
        assert_eq!(line.as_deref(), Some("{\"ts\":1}"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_tail_lines(&dir.path().join("nope"), 5, Duration::from_secs(1))
            .expect_err("missing");
        assert!(matches!(err, IngestError::Io(_)));
    }

    #[test]
    fn hung_read_blocks_only_its_own_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hung.jsonl");
        std::fs::write(&path, "line\n").expect("write");
        let (release, wait) = mpsc::channel::<()>();

        let err = run_exclusive(&path, Duration::from_millis(20), move |_| {
            let _ = wait.recv();
            Ok(())
        })
        .expect_err("timeout");
        assert!(matches!(err, IngestError::Timeout(_)));

        let err = read_tail_lines(&path, 5, Duration::from_secs(1)).expect_err("busy");
        assert!(matches!(err, IngestError::Busy(_)));

        let other = dir.path().join("other.jsonl");
        std::fs::write(&other, "a\n").expect("write");
        assert_eq!(
            read_tail_lines(&other, 5, Duration::from_secs(1)).expect("tail"),
            vec!["a"]
        );

        release.send(()).expect("release");
        let mut lines = None;
        for _ in 0..100 {
            match read_tail_lines(&path, 5, Duration::from_secs(1)) {
                Ok(found) => {
                    lines = Some(found);
                    break;
                }
                Err(IngestError::Busy(_)) => thread::sleep(Duration::from_millis(10)),
                Err(err) => panic!("unexpected error: {err}"),
            }
        }
        assert_eq!(lines.expect("slot released"), vec!["line"]);
    }

    #[test]
    fn slow_reads_time_out() {
        let err = run_with_timeout(Duration::from_millis(20), || {
            thread::sleep(Duration::from_millis(500));
            Ok(())
        })
        .expect_err("timeout");
        assert!(matches!(err, IngestError::Timeout(_)));
    }
}
