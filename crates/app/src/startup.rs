use std::path::{Path, PathBuf};

/// Locations of every artifact the dashboard reads.
#[derive(Clone, Debug)]
pub struct AppPaths {
    pub openclaw_home: PathBuf,
    pub sessions_dir: PathBuf,
    pub registry_path: PathBuf,
    pub workspace_dir: PathBuf,
    pub live_session_path: PathBuf,
    pub handoff_path: PathBuf,
    pub memory_dir: PathBuf,
}

impl AppPaths {
    pub fn new(openclaw_home: PathBuf) -> Self {
        let sessions_dir = openclaw_home.join("agents").join("main").join("sessions");
        let registry_path = sessions_dir.join("sessions.json");
        let workspace_dir = openclaw_home.join("workspace");
        Self::with_dirs(openclaw_home, sessions_dir, registry_path, workspace_dir)
    }

    pub fn with_dirs(
        openclaw_home: PathBuf,
        sessions_dir: PathBuf,
        registry_path: PathBuf,
        workspace_dir: PathBuf,
    ) -> Self {
        let live_session_path = workspace_dir.join("scratch").join("live-session.json");
        let handoff_path = workspace_dir.join("HANDOFF.md");
        let memory_dir = workspace_dir.join("memory");
        Self {
            openclaw_home,
            sessions_dir,
            registry_path,
            workspace_dir,
            live_session_path,
            handoff_path,
            memory_dir,
        }
    }

    pub fn session_log(&self, session_id: &str) -> PathBuf {
        ingest::session_log_path(&self.sessions_dir, session_id)
    }
}

/// Required locations that do not exist yet, labelled for startup logging.
pub fn missing_sources(paths: &AppPaths) -> Vec<(&'static str, PathBuf)> {
    let required: [(&'static str, &Path); 2] = [
        ("session registry", paths.registry_path.as_path()),
        ("workspace", paths.workspace_dir.as_path()),
    ];
    required
        .into_iter()
        .filter(|(_, path)| !path.exists())
        .map(|(label, path)| (label, path.to_path_buf()))
        .collect()
}
