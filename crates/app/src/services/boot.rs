use std::path::{Path, PathBuf};

use dashboard_core::{BootFileEntry, BootPayload};
use walkdir::WalkDir;

use crate::services::SharedConfig;

/// Context files loaded at session start, in reporting order.
pub const TRACKED_FILES: [&str; 6] = [
    "AGENTS.md",
    "SOUL.md",
    "USER.md",
    "MEMORY.md",
    "HANDOFF.md",
    "IDENTITY.md",
];

const FILE_LIMITS: [(&str, u64); 3] = [
    ("AGENTS.md", 4000),
    ("MEMORY.md", 1500),
    ("HANDOFF.md", 2000),
];

/// Byte ceiling for tracked files without their own entry.
pub const FALLBACK_LIMIT: u64 = 1500;

pub fn limit_for(name: &str) -> u64 {
    FILE_LIMITS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, limit)| *limit)
        .unwrap_or(FALLBACK_LIMIT)
}

fn audit_files(workspace_dir: &Path) -> Vec<BootFileEntry> {
    TRACKED_FILES
        .iter()
        .filter_map(|name| {
            let size = std::fs::metadata(workspace_dir.join(name)).ok()?.len();
            let limit = limit_for(name);
            Some(BootFileEntry {
                name: (*name).to_string(),
                size,
                limit,
                over: size > limit,
            })
        })
        .collect()
}

fn directory_entries(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
}

fn memory_stats(memory_dir: &Path) -> (usize, u64) {
    let mut count = 0;
    let mut size = 0u64;
    for entry in directory_entries(memory_dir)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".md"))
    {
        count += 1;
        if let Ok(metadata) = std::fs::metadata(entry.path()) {
            size = size.saturating_add(metadata.len());
        }
    }
    (count, size)
}

fn count_skills(skill_dirs: &[PathBuf]) -> usize {
    skill_dirs
        .iter()
        .map(|dir| {
            directory_entries(dir)
                .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
                .count()
        })
        .sum()
}

/// Sizes of the boot context files plus memory and skill inventory. Missing
/// files and directories contribute nothing.
pub fn audit_boot_payload(
    workspace_dir: &Path,
    memory_dir: &Path,
    skill_dirs: &[PathBuf],
) -> BootPayload {
    let files = audit_files(workspace_dir);
    let total = files.iter().map(|file| file.size).sum();
    let (memory_files, memory_size) = memory_stats(memory_dir);
    BootPayload {
        files,
        total,
        memory_files,
        memory_size,
        skills: count_skills(skill_dirs),
    }
}

#[derive(Clone)]
pub struct BootService {
    config: SharedConfig,
}

impl BootService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn audit(&self) -> BootPayload {
        let paths = &self.config.paths;
        audit_boot_payload(
            &paths.workspace_dir,
            &paths.memory_dir,
            &self.config.skill_dirs,
        )
    }
}
