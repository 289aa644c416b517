//! Configuration loading
//!
//! Resolution priority for every setting:
//! 1. Environment variable (highest)
//! 2. TOML config file (`<config_dir>/streamlite/config.toml`)
//! 3. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUDIUS_BASE_URL: &str = "https://discoveryprovider.audius.co/v1";
pub const DEFAULT_DATABASE_FILE: &str = "streamlite.db";

/// Spotify client-credentials pair. Optional as a whole: without it the
/// Spotify adapter degrades to permanent empty results.
#[derive(Debug, Clone)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub port: u16,
    /// SQLite database path for the local catalog
    pub database_path: PathBuf,
    /// Spotify credentials, if configured
    pub spotify: Option<SpotifyCredentials>,
    /// Audius discovery-provider base URL
    pub audius_base_url: String,
}

/// On-disk TOML shape; every field optional so a partial file is valid
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    port: Option<u16>,
    database_path: Option<PathBuf>,
    spotify_client_id: Option<String>,
    spotify_client_secret: Option<String>,
    audius_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment and config file.
    pub fn load() -> Result<Self> {
        let file = load_config_file()?;

        let port = match env_var("STREAMLITE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| Error::Config(format!("Invalid STREAMLITE_PORT: {raw}")))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let database_path = env_var("STREAMLITE_DB")
            .map(PathBuf::from)
            .or(file.database_path)
            .unwrap_or_else(default_database_path);

        let client_id = env_var("SPOTIFY_CLIENT_ID").or(file.spotify_client_id);
        let client_secret = env_var("SPOTIFY_CLIENT_SECRET").or(file.spotify_client_secret);
        let spotify = match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyCredentials {
                client_id,
                client_secret,
            }),
            (None, None) => None,
            _ => {
                return Err(Error::Config(
                    "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set together".to_string(),
                ))
            }
        };

        let audius_base_url = env_var("AUDIUS_BASE_URL")
            .or(file.audius_base_url)
            .unwrap_or_else(|| DEFAULT_AUDIUS_BASE_URL.to_string());

        Ok(Self {
            port,
            database_path,
            spotify,
            audius_base_url,
        })
    }
}

/// Read an environment variable, treating empty values as unset
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse the TOML config file if one exists; a missing file is not an error
fn load_config_file() -> Result<TomlConfig> {
    let Some(path) = config_file_path() else {
        return Ok(TomlConfig::default());
    };
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let parsed = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {e}", path.display())))?;
    tracing::info!("Loaded config file: {}", path.display());
    Ok(parsed)
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("streamlite").join("config.toml"))
}

/// Default database location: `<data_dir>/streamlite/streamlite.db`,
/// falling back to the working directory
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("streamlite"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATABASE_FILE)
}
