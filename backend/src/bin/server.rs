//! mvMapper HTTP Server Binary
//!
//! This is the main entry point for the mvMapper server.
//! It prepares the data directory, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! DATA_DIR=data PORT=8080 cargo run --bin mvmapper-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `DATA_DIR`: Dataset, config and upload directory (default: data)
//! - `STATIC_DIR`: Static assets served under /stat (default: stat)
//! - `FAVICON`: Favicon path (default: favicon.ico)
//! - `HELP_PAGE`: Markdown help page (default: helpPage.md)
//! - `DEFAULT_DATA`: Dataset shown without a `d` parameter (default: demo.csv)
//! - `JITTER_SEED`: Fixed seed for map jitter (default: unset)
//! - `MAX_UPLOAD_BYTES`: Request body limit (default: 52428800)
//! - `SESSION_TTL_SECS`: Idle session lifetime, 0 keeps sessions (default: 1800)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use mvmapper::http::{create_router, AppState};
use mvmapper::services::SessionStore;
use mvmapper::storage::{DatasetStore, FsDatasetStore, ServerConfig};

/// Upper bound on the pause between idle-session sweeps.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
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

    if let Err(e) = run().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting mvMapper server");

    let config = ServerConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let addr = config.bind_addr().map_err(|e| anyhow::anyhow!(e))?;

    let store = FsDatasetStore::new(&config.data_dir);
    store
        .ensure_root()
        .await
        .context("failed to prepare data directory")?;
    info!("Dataset store: {}", store.describe());

    if !store.exists(&config.default_data).await? {
        warn!(
            "Default dataset {} not found in {}; pages without a d parameter will fail",
            config.default_data,
            config.data_dir.display()
        );
    }

    let session_ttl = config.session_ttl();
    let state = AppState::new(Arc::new(store), config).context("failed to load page templates")?;
    if let Some(ttl) = session_ttl {
        info!("Idle sessions expire after {}s", ttl.as_secs());
        spawn_session_sweeper(state.sessions.clone(), ttl.min(SWEEP_INTERVAL));
    }
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop idle sessions so an idle server also releases them.
fn spawn_session_sweeper(sessions: SessionStore, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let sessions = sessions.clone();
            if let Err(e) = tokio::task::spawn_blocking(move || sessions.evict_idle()).await {
                warn!("Session sweep failed: {}", e);
            }
        }
    });
}
