use std::path::{Path, PathBuf};

pub fn default_openclaw_home() -> PathBuf {
    if let Ok(path) = std::env::var("OPENCLAW_HOME") {
        return PathBuf::from(path);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".openclaw");
    }
    PathBuf::from(".openclaw")
}

pub fn session_log_path(sessions_dir: &Path, session_id: &str) -> PathBuf {
    sessions_dir.join(format!("{session_id}.jsonl"))
}
