use std::path::Path;

use dashboard_core::LiveSession;
use tracing::{debug, info, warn};

use crate::services::SharedConfig;

/// Outcome of comparing a live-session snapshot with the session start.
#[derive(Debug, Clone, PartialEq)]
pub enum Freshness {
    Fresh(LiveSession),
    Stale,
}

/// A snapshot is stale only when both timestamps are known and it was last
/// written before the current session began.
pub fn check_freshness(snapshot: LiveSession, session_start: Option<&str>) -> Freshness {
    let Some(started) = session_start.and_then(ingest::parse_timestamp) else {
        return Freshness::Fresh(snapshot);
    };
    let Some(updated) = snapshot
        .updated_at
        .as_ref()
        .and_then(ingest::timestamp_from_value)
    else {
        return Freshness::Fresh(snapshot);
    };
    if updated < started {
        Freshness::Stale
    } else {
        Freshness::Fresh(snapshot)
    }
}

#[derive(Clone)]
pub struct LiveSessionService {
    config: SharedConfig,
}

impl LiveSessionService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Current live-session snapshot, or `None` when absent, unreadable or
    /// left over from an earlier session. Stale files are deleted.
    pub fn load(&self, session_start: Option<&str>) -> Option<LiveSession> {
        let path = &self.config.paths.live_session_path;
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!("live session unreadable at {}: {}", path.display(), err);
                return None;
            }
        };
        let snapshot: LiveSession = match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!("live session unparseable at {}: {}", path.display(), err);
                return None;
            }
        };
        match check_freshness(snapshot, session_start) {
            Freshness::Fresh(snapshot) => Some(snapshot),
            Freshness::Stale => {
                purge(path);
                None
            }
        }
    }
}

fn purge(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => info!("removed stale live session at {}", path.display()),
        Err(err) => warn!(
            "failed to remove stale live session at {}: {}",
            path.display(),
            err
        ),
    }
}
