//! Provider adapters and search/resolve services
//!
//! Each adapter wraps one external music API and owns the mapping from its
//! wire format into the common `Track` shape. Adapter `search` operations
//! never fail: transport and parse errors are logged and collapse to an
//! empty list at the public boundary, so one provider cannot abort an
//! aggregate search.

pub mod aggregator;
pub mod audius;
pub mod catalog;
pub mod internet_archive;
pub mod resolver;
pub mod spotify;

pub use aggregator::aggregate_search;
pub use audius::AudiusClient;
pub use catalog::CatalogStore;
pub use internet_archive::{ArchiveClient, ArchiveError, ResolvedAudio};
pub use resolver::{resolve_track, Resolution};
pub use spotify::SpotifyClient;

/// User-Agent sent to every external provider
pub const USER_AGENT: &str = concat!("StreamLite/", env!("CARGO_PKG_VERSION"));

/// Per-adapter request timeout. A slow provider degrades to an empty
/// result instead of holding up the whole aggregate.
pub const PROVIDER_TIMEOUT_SECS: u64 = 5;

/// Max results requested from each provider and the local catalog
pub const SEARCH_LIMIT: u32 = 10;
