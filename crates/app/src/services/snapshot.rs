use chrono::{DateTime, Utc};
use dashboard_core::{ContextSource, SessionRecord, Snapshot};
use tracing::debug;

use crate::error::Result;
use crate::services::{
    BootService, HandoffService, LiveSessionService, RegistryService, SharedConfig,
};
use crate::velocity::{VelocityEstimator, project_wrap};

const DEFAULT_LABEL: &str = "Workspace";
const UNKNOWN_MODEL: &str = "unknown";

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

fn session_label(record: &SessionRecord) -> String {
    non_empty(&record.label)
        .or_else(|| non_empty(&record.display_name))
        .unwrap_or(DEFAULT_LABEL)
        .to_string()
}

/// Builds the per-request dashboard snapshot.
#[derive(Clone)]
pub struct SnapshotService {
    config: SharedConfig,
    registry: RegistryService,
    live: LiveSessionService,
    boot: BootService,
    handoff: HandoffService,
}

impl SnapshotService {
    pub(super) fn new(
        config: SharedConfig,
        registry: RegistryService,
        live: LiveSessionService,
        boot: BootService,
        handoff: HandoffService,
    ) -> Self {
        Self {
            config,
            registry,
            live,
            boot,
            handoff,
        }
    }

    pub fn assemble(&self, velocity: &mut VelocityEstimator) -> Result<Snapshot> {
        self.assemble_at(Utc::now(), velocity)
    }

    /// Only a registry failure is an error; every other source degrades to
    /// `None` or an empty value. `velocity` is updated at most once.
    pub fn assemble_at(
        &self,
        now: DateTime<Utc>,
        velocity: &mut VelocityEstimator,
    ) -> Result<Snapshot> {
        let session = self.registry.workspace_session()?;
        let timeout = self.config.read_timeout;

        let log_path = session
            .session_id
            .as_deref()
            .map(|id| self.config.paths.session_log(id));
        let usage = log_path.as_deref().and_then(|path| {
            ingest::latest_usage_from_log(path, self.config.tail_lines, timeout)
        });
        let session_start = log_path
            .as_deref()
            .and_then(|path| ingest::session_start_from_log(path, timeout));
        let live = self.live.load(session_start.as_deref());
        let handoff = self.handoff.summary();
        let boot = self.boot.audit();

        let context_window = session
            .context_tokens
            .filter(|tokens| *tokens > 0)
            .unwrap_or(self.config.default_context_window);
        let context_used = usage.map(|usage| usage.context);
        let rate = match context_used {
            Some(used) => velocity.update_at(now, used),
            None => 0.0,
        };
        let projection = project_wrap(context_window, context_used, rate);

        debug!(
            session_id = session.session_id.as_deref().unwrap_or("-"),
            context_used = context_used.unwrap_or(0),
            velocity = rate,
            "assembled snapshot"
        );

        Ok(Snapshot {
            label: session_label(&session),
            model: non_empty(&session.model)
                .unwrap_or(UNKNOWN_MODEL)
                .to_string(),
            context_window,
            updated_at: session.updated_at,
            session_start,
            context_used,
            context_source: if usage.is_some() {
                ContextSource::Jsonl
            } else {
                ContextSource::Unavailable
            },
            usage,
            handoff,
            live,
            boot,
            velocity: rate.round() as i64,
            wrap_threshold: projection.threshold,
            tokens_to_wrap: projection.tokens_to_wrap,
            minutes_to_wrap: projection.minutes_to_wrap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_label_then_display_name() {
        let mut record = SessionRecord {
            label: Some("Main".to_string()),
            display_name: Some("Discord".to_string()),
            ..SessionRecord::default()
        };
        assert_eq!(session_label(&record), "Main");
        record.label = Some(String::new());
        assert_eq!(session_label(&record), "Discord");
        record.display_name = None;
        assert_eq!(session_label(&record), DEFAULT_LABEL);
    }
}
