//! streamlite-api library interface
//!
//! Exposes the application state and router so integration tests can drive
//! the service without binding a socket.

pub mod api;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::{ArchiveClient, AudiusClient, CatalogStore, SpotifyClient};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Local catalog queries
    pub catalog: CatalogStore,
    /// Spotify adapter (owns the token cache)
    pub spotify: Arc<SpotifyClient>,
    /// Audius adapter
    pub audius: Arc<AudiusClient>,
    /// Internet Archive adapter
    pub archive: Arc<ArchiveClient>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        spotify: SpotifyClient,
        audius: AudiusClient,
        archive: ArchiveClient,
    ) -> Self {
        Self {
            catalog,
            spotify: Arc::new(spotify),
            audius: Arc::new(audius),
            archive: Arc::new(archive),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(api::global_search))
        .route("/api/resolve", post(api::resolve_audio))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
