use dashboard_app::{ApiError, Result};
use tracing::warn;

use crate::{AppContext, ContextResponse, HandoffResponse, NO_HANDOFF_MESSAGE};

/// Assembles one snapshot, feeding the shared velocity estimator exactly once.
pub fn context_snapshot(ctx: &AppContext) -> ContextResponse {
    let mut velocity = ctx.velocity.lock();
    match ctx.app_state.services.snapshot.assemble(&mut velocity) {
        Ok(snapshot) => ContextResponse::Snapshot(Box::new(snapshot)),
        Err(err) => {
            warn!("snapshot unavailable: {}", err);
            ContextResponse::Unavailable(ApiError::from(err))
        }
    }
}

pub fn handoff_document(ctx: &AppContext) -> Result<HandoffResponse> {
    let response = match ctx.app_state.services.handoff.document()? {
        Some(document) => HandoffResponse {
            content: document.content,
            mtime: document.mtime,
        },
        None => HandoffResponse {
            content: NO_HANDOFF_MESSAGE.to_string(),
            mtime: None,
        },
    };
    Ok(response)
}
