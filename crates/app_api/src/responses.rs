use dashboard_app::ApiError;
use dashboard_core::Snapshot;
use serde::Serialize;

pub const NO_HANDOFF_MESSAGE: &str = "No HANDOFF.md file found.";

/// Body of `/api/context`: a snapshot, or a payload-level error when the
/// session registry cannot supply the workspace session.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ContextResponse {
    Snapshot(Box<Snapshot>),
    Unavailable(ApiError),
}

#[derive(Debug, Serialize)]
pub struct HandoffResponse {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime: Option<String>,
}
