mod assets;
mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    http::{
        HeaderValue,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL},
    },
    middleware as axum_middleware,
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub use errors::HttpError;
pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route(
            "/context",
            get(handlers::context).layer(SetResponseHeaderLayer::overriding(
                CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store"),
            )),
        )
        .route("/handoff", get(handlers::handoff))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::ui_fallback)
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
