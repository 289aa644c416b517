//! streamlite-api - Media streaming backend
//!
//! REST service exposing multi-source track search and audio resolution
//! over a local catalog plus Spotify, Audius, and Internet Archive.

use anyhow::Result;
use tracing::info;
use streamlite_api::services::{ArchiveClient, AudiusClient, CatalogStore, SpotifyClient};
use streamlite_api::{build_router, db, AppState};
use streamlite_common::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting StreamLite backend (streamlite-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::load()?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    info!("Catalog database: {}", config.database_path.display());
    let pool = db::connect(&config.database_path).await?;

    let catalog = CatalogStore::new(pool);
    let spotify = SpotifyClient::new(config.spotify.clone())?;
    let audius = AudiusClient::new(config.audius_base_url.clone())?;
    let archive = ArchiveClient::new()?;
    info!("Audius discovery provider: {}", config.audius_base_url);

    let state = AppState::new(catalog, spotify, audius, archive);
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("streamlite-api listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app).await?;

    Ok(())
}
