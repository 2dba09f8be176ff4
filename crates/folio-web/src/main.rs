//! Folio Web Server
//!
//! Run with: cargo run -p folio-web

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use folio_common::SiteConfig;
use folio_web::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env with RUST_LOG / FOLIO_CONFIG
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Folio Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = SiteConfig::load()?;
    let state: SharedState = Arc::new(AppState::new(config)?);

    // Sections render as skeletons until the first load lands.
    let loading = state.clone();
    tokio::spawn(async move {
        let loaded = loading.reload().await;
        if loaded == 0 {
            warn!("No content resources could be loaded");
        }
    });

    let addr = state.config.bind_addr();
    let app = folio_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
