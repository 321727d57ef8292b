use std::path::PathBuf;
use std::time::Duration;

use crate::config::{GLOBAL_SKILLS_DIR, MonitorSettings};
use crate::services::AppServices;
use crate::startup::AppPaths;

/// Resolved paths and limits for one monitored workspace.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: AppPaths,
    pub workspace_key: String,
    pub skill_dirs: Vec<PathBuf>,
    pub tail_lines: usize,
    pub read_timeout: Duration,
    pub default_context_window: u64,
}

impl AppConfig {
    pub fn new(paths: AppPaths, settings: &MonitorSettings) -> Self {
        let skill_dirs = settings.skill_dirs.clone().unwrap_or_else(|| {
            vec![
                paths.workspace_dir.join("skills"),
                PathBuf::from(GLOBAL_SKILLS_DIR),
            ]
        });
        Self {
            paths,
            workspace_key: settings.workspace_key.clone(),
            skill_dirs,
            tail_lines: settings.tail_lines,
            read_timeout: settings.read_timeout(),
            default_context_window: settings.default_context_window,
        }
    }
}

/// Application state shared by the HTTP front end.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }
}
