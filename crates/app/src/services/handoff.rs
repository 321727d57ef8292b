use std::collections::HashMap;

use dashboard_core::HandoffSummary;
use tracing::debug;

use crate::error::Result;
use crate::services::SharedConfig;
use crate::util::time::file_mtime;

const MAX_NEXT_STEPS: usize = 3;

/// Raw handoff note with its modification time. Invalid UTF-8 is replaced,
/// `size` is the on-disk byte length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffDocument {
    pub content: String,
    pub size: u64,
    pub mtime: Option<String>,
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(['-', '*'])
        .map(str::trim_start)
        .unwrap_or(line)
}

/// Maps each `## ` heading to its non-blank lines, bullet markers removed.
/// Text before the first heading is ignored; a repeated heading starts over.
pub fn parse_sections(content: &str) -> HashMap<String, Vec<String>> {
    let mut sections: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;
    for line in content.lines() {
        if let Some(heading) = line.strip_prefix("## ") {
            let heading = heading.trim().to_string();
            sections.insert(heading.clone(), Vec::new());
            current = Some(heading);
        } else if let Some(section) = current.as_ref()
            && !line.trim().is_empty()
            && let Some(lines) = sections.get_mut(section)
        {
            lines.push(strip_bullet(line).to_string());
        }
    }
    sections
}

pub fn summarize_handoff(content: &str, size: u64, mtime: Option<String>) -> HandoffSummary {
    let sections = parse_sections(content);
    let first_line = |name: &str| {
        sections
            .get(name)
            .and_then(|lines| lines.first())
            .filter(|line| !line.is_empty())
            .cloned()
    };
    HandoffSummary {
        current_work: first_line("Current Work"),
        stopping_point: first_line("Stopping Point"),
        next_steps: sections
            .get("Next Steps")
            .map(|lines| lines.iter().take(MAX_NEXT_STEPS).cloned().collect())
            .unwrap_or_default(),
        open_questions: sections.get("Open Questions").map_or(0, Vec::len),
        size,
        mtime,
    }
}

#[derive(Clone)]
pub struct HandoffService {
    config: SharedConfig,
}

impl HandoffService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Raw note for display. `Ok(None)` when no note has been written.
    pub fn document(&self) -> Result<Option<HandoffDocument>> {
        let path = &self.config.paths.handoff_path;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(path)?;
        Ok(Some(HandoffDocument {
            content: String::from_utf8_lossy(&bytes).into_owned(),
            size: bytes.len() as u64,
            mtime: file_mtime(path),
        }))
    }

    pub fn summary(&self) -> Option<HandoffSummary> {
        match self.document() {
            Ok(document) => {
                document.map(|doc| summarize_handoff(&doc.content, doc.size, doc.mtime))
            }
            Err(err) => {
                debug!("handoff note unavailable: {}", err);
                None
            }
        }
    }
}
