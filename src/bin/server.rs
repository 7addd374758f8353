//! Assay Monitor HTTP Server Binary
//!
//! This is the main entry point for the aggregation REST API server.
//! It loads the configuration, fetches the static resources once and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve from a local data directory (default)
//! cargo run --bin am-server
//!
//! # Serve resources fetched from a static file host
//! DATA_SOURCE=http DATA_ROOT=https://assets.example.org/dashboard \
//!   cargo run --bin am-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `DATA_SOURCE`: "local" or "http" (default: local)
//! - `DATA_ROOT`: data directory or base URL (default: .)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use assay_monitor::config::AppConfig;
use assay_monitor::http::{create_router, AppState};
use assay_monitor::resources::ResourceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Assay Monitor HTTP Server");

    let config = AppConfig::from_default_location()?.with_env_overrides()?;
    let fetcher = config.fetcher()?;

    // Fetch every startup resource once; a failed resource leaves its
    // endpoints unavailable while the rest serve
    let store = Arc::new(ResourceStore::load(fetcher, &config.resources).await);
    let statuses = store.statuses();
    let loaded = statuses.iter().filter(|status| status.ok).count();
    if loaded == statuses.len() {
        info!("All {} resources loaded", statuses.len());
    } else {
        warn!(
            "{}/{} resources loaded, the rest report unavailable",
            loaded,
            statuses.len()
        );
    }

    // Create application state and router
    let state = AppState::new(store);
    let app = create_router(state);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health report: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
