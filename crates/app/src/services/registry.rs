use dashboard_core::SessionRecord;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::services::SharedConfig;

/// Reads the agent's session registry, the one source a snapshot cannot do
/// without.
#[derive(Clone)]
pub struct RegistryService {
    config: SharedConfig,
}

impl RegistryService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn load(&self) -> Result<Map<String, Value>> {
        let path = &self.config.paths.registry_path;
        let contents = ingest::read_to_string(path, self.config.read_timeout).map_err(|err| {
            AppError::Registry(format!(
                "session registry unavailable at {}: {}",
                path.display(),
                err
            ))
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            AppError::Registry(format!(
                "session registry at {} is not a JSON object: {}",
                path.display(),
                err
            ))
        })
    }

    pub fn workspace_session(&self) -> Result<SessionRecord> {
        let mut sessions = self.load()?;
        let entry = sessions
            .remove(&self.config.workspace_key)
            .filter(|entry| !entry.is_null())
            .ok_or_else(|| AppError::NotFound("Workspace session not found".to_string()))?;
        if !entry.is_object() {
            debug!(
                "registry entry for {} is not an object",
                self.config.workspace_key
            );
        }
        Ok(session_record(&entry))
    }
}

fn text_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

fn count_field(entry: &Value, key: &str) -> Option<u64> {
    let value = entry.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|count| count.is_finite() && *count >= 0.0)
            .map(|count| count.round() as u64)
    })
}

/// Fields of the wrong type read as absent so the caller falls back to its
/// defaults instead of failing the snapshot.
fn session_record(entry: &Value) -> SessionRecord {
    SessionRecord {
        session_id: text_field(entry, "sessionId"),
        label: text_field(entry, "label"),
        display_name: text_field(entry, "displayName"),
        model: text_field(entry, "model"),
        context_tokens: count_field(entry, "contextTokens"),
        updated_at: entry.get("updatedAt").filter(|value| !value.is_null()).cloned(),
    }
}
