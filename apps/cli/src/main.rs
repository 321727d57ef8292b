mod args;
mod config;
mod home;

use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use dashboard_app::{AppConfig, AppPaths, AppState, missing_sources};
use http_api::HttpState;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::parse_args();
    setup_logging(args.debug);

    let loaded = config::load(args.config.as_deref()).map_err(io::Error::other)?;
    match &loaded.file {
        Some(file) => info!("loaded config from {}", file.display()),
        None => info!("no config file found, using defaults"),
    }
    let config = loaded.config;

    let openclaw_home = home::resolve_openclaw_home(config.openclaw_home.as_deref());
    let paths = AppPaths::new(openclaw_home);
    for (label, path) in missing_sources(&paths) {
        warn!("{} not found at {}", label, path.display());
    }

    let app_config = AppConfig::new(paths, &config.monitor);
    info!(
        workspace_key = %app_config.workspace_key,
        home = %app_config.paths.openclaw_home.display(),
        "monitoring workspace session"
    );
    let context = AppContext::new(AppState::new(app_config));
    let router = http_api::router(HttpState::new(context));

    let port = args.port.unwrap_or(config.port);
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;
    let actual_port = listener.local_addr()?.port();

    println!("Buffer Dashboard on http://127.0.0.1:{actual_port}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("info,buffer_dashboard_cli=debug,dashboard_app=debug,app_api=debug,http_api=debug,ingest=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
