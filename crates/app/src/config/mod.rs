use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Registry key of the monitored workspace session.
pub const DEFAULT_WORKSPACE_KEY: &str = "agent:main:discord:channel:1470820351674945606";
/// Context window assumed when the registry entry does not declare one.
pub const DEFAULT_CONTEXT_WINDOW: u64 = 1_000_000;
/// Skills shipped with the global agent install.
pub const GLOBAL_SKILLS_DIR: &str = "/opt/homebrew/lib/node_modules/openclaw/skills";

/// User-tunable monitoring knobs, loadable from a config file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MonitorSettings {
    pub workspace_key: String,
    pub skill_dirs: Option<Vec<PathBuf>>,
    pub tail_lines: usize,
    pub read_timeout_ms: u64,
    pub default_context_window: u64,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            workspace_key: DEFAULT_WORKSPACE_KEY.to_string(),
            skill_dirs: None,
            tail_lines: ingest::DEFAULT_TAIL_LINES,
            read_timeout_ms: ingest::DEFAULT_READ_TIMEOUT.as_millis() as u64,
            default_context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

impl MonitorSettings {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms.max(1))
    }
}
