mod boot;
mod handoff;
mod live;
mod registry;
mod snapshot;

use std::sync::Arc;

use crate::app::AppConfig;

pub use boot::{BootService, FALLBACK_LIMIT, TRACKED_FILES, audit_boot_payload, limit_for};
pub use handoff::{HandoffDocument, HandoffService, parse_sections, summarize_handoff};
pub use live::{Freshness, LiveSessionService, check_freshness};
pub use registry::RegistryService;
pub use snapshot::SnapshotService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for the artifacts behind one snapshot.
#[derive(Clone)]
pub struct AppServices {
    pub registry: RegistryService,
    pub live: LiveSessionService,
    pub boot: BootService,
    pub handoff: HandoffService,
    pub snapshot: SnapshotService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        let registry = RegistryService::new(shared.clone());
        let live = LiveSessionService::new(shared.clone());
        let boot = BootService::new(shared.clone());
        let handoff = HandoffService::new(shared.clone());
        let snapshot = SnapshotService::new(
            shared,
            registry.clone(),
            live.clone(),
            boot.clone(),
            handoff.clone(),
        );
        Self {
            registry,
            live,
            boot,
            handoff,
            snapshot,
        }
    }
}
