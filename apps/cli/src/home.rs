use std::path::PathBuf;

use app_api::expand_home_path;

/// Config file value first, then `OPENCLAW_HOME`, then `~/.openclaw`.
pub fn resolve_openclaw_home(configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim).filter(|path| !path.is_empty()) {
        Some(path) => expand_home_path(path),
        None => ingest::default_openclaw_home(),
    }
}
