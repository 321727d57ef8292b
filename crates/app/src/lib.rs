pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;
pub mod velocity;

pub use app::{AppConfig, AppState};
pub use config::MonitorSettings;
pub use error::{ApiError, AppError, Result};
pub use services::{
    AppServices, BootService, Freshness, HandoffDocument, HandoffService, LiveSessionService,
    RegistryService, SnapshotService, audit_boot_payload, check_freshness, parse_sections,
    summarize_handoff,
};
pub use startup::{AppPaths, missing_sources};
pub use util::time::{file_mtime, system_time_to_rfc3339};
pub use velocity::{VelocityEstimator, project_wrap};
