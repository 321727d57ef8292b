use std::sync::Arc;

use dashboard_app::{AppState, VelocityEstimator};
use parking_lot::Mutex;

/// Per-process handler context. The velocity estimator is the only state that
/// outlives a request; holding its lock serializes snapshot assembly.
#[derive(Clone)]
pub struct AppContext {
    pub app_state: AppState,
    pub velocity: Arc<Mutex<VelocityEstimator>>,
}

impl AppContext {
    pub fn new(app_state: AppState) -> Self {
        Self {
            app_state,
            velocity: Arc::new(Mutex::new(VelocityEstimator::new())),
        }
    }
}
