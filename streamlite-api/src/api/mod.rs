//! HTTP API handlers

pub mod health;
pub mod resolve;
pub mod search;

pub use health::health_routes;
pub use resolve::resolve_audio;
pub use search::global_search;
