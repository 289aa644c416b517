//! # StreamLite Common Library
//!
//! Shared code for the StreamLite backend:
//! - The unified `Track` model and its `Source`/`TrackKind` tags
//! - Text normalization used for query building and fuzzy matching
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod normalize;
pub mod track;

pub use error::{Error, Result};
pub use normalize::normalize;
pub use track::{Source, Track, TrackKind};
