use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token usage recovered from the newest usage-bearing session log record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSample {
    pub context: u64,
    pub input: Option<u64>,
    pub cache_read: Option<u64>,
    pub cache_write: Option<u64>,
    pub output: Option<u64>,
}

impl UsageSample {
    pub fn from_parts(
        input: Option<u64>,
        cache_read: Option<u64>,
        cache_write: Option<u64>,
        output: Option<u64>,
    ) -> Self {
        let context = input
            .unwrap_or(0)
            .saturating_add(cache_read.unwrap_or(0))
            .saturating_add(cache_write.unwrap_or(0));
        Self {
            context,
            input,
            cache_read,
            cache_write,
            output,
        }
    }
}

/// Status file written by the agent while a session is in progress.
///
/// Only `updatedAt` is interpreted; every other field is passed through to the
/// dashboard untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Value>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One workspace entry of the session registry (`sessions.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub context_tokens: Option<u64>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffSummary {
    pub current_work: Option<String>,
    pub stopping_point: Option<String>,
    pub next_steps: Vec<String>,
    pub open_questions: usize,
    pub size: u64,
    pub mtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootFileEntry {
    pub name: String,
    pub size: u64,
    pub limit: u64,
    pub over: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootPayload {
    pub files: Vec<BootFileEntry>,
    pub total: u64,
    pub memory_files: usize,
    pub memory_size: u64,
    pub skills: usize,
}

/// Distance to the wrap threshold and, when the burn rate is meaningful, the
/// projected minutes until it is reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrapProjection {
    pub threshold: f64,
    pub tokens_to_wrap: Option<f64>,
    pub minutes_to_wrap: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    Jsonl,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub label: String,
    pub model: String,
    pub context_window: u64,
    pub updated_at: Option<Value>,
    pub session_start: Option<String>,
    pub context_used: Option<u64>,
    pub context_source: ContextSource,
    pub usage: Option<UsageSample>,
    pub handoff: Option<HandoffSummary>,
    pub live: Option<LiveSession>,
    pub boot: BootPayload,
    pub velocity: i64,
    pub wrap_threshold: f64,
    pub tokens_to_wrap: Option<f64>,
    pub minutes_to_wrap: Option<i64>,
}
