//! Spotify search adapter
//!
//! Uses the client-credentials OAuth flow. The access token is cached on
//! the client instance behind an async mutex and refreshed only when the
//! captured expiry has passed; concurrent refreshes are benign (each fetch
//! yields a usable token, last write wins).

use serde::Deserialize;
use std::time::{Duration, Instant};
use streamlite_common::config::SpotifyCredentials;
use streamlite_common::{Source, Track, TrackKind};
use thiserror::Error;
use tokio::sync::Mutex;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Spotify adapter errors. These stay inside the adapter: the public
/// `search` collapses every failure to an empty list.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify credentials not configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to authenticate with Spotify: {0}")]
    Auth(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Cached access token with its absolute expiry instant
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<SpotifyTrack>,
}

#[derive(Debug, Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    artists: Vec<SpotifyArtist>,
    album: SpotifyAlbum,
    preview_url: Option<String>,
    duration_ms: f64,
}

#[derive(Debug, Deserialize)]
struct SpotifyArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SpotifyAlbum {
    name: String,
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

/// Spotify API client
pub struct SpotifyClient {
    http_client: reqwest::Client,
    credentials: Option<SpotifyCredentials>,
    token_url: String,
    api_base_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    /// Create a client. `credentials = None` permanently disables the
    /// adapter (every search returns empty) rather than failing.
    pub fn new(credentials: Option<SpotifyCredentials>) -> Result<Self, SpotifyError> {
        if credentials.is_none() {
            tracing::warn!("Spotify credentials not configured; Spotify search disabled");
        }
        let http_client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(Duration::from_secs(super::PROVIDER_TIMEOUT_SECS))
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            credentials,
            token_url: TOKEN_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Override endpoint URLs (integration tests)
    #[doc(hidden)]
    pub fn with_base_urls(mut self, token_url: String, api_base_url: String) -> Self {
        self.token_url = token_url;
        self.api_base_url = api_base_url;
        self
    }

    /// Search Spotify tracks, collapsing any failure to an empty list.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        match self.try_search(query).await {
            Ok(tracks) => tracks,
            Err(SpotifyError::NotConfigured) => {
                tracing::debug!("Spotify search skipped (not configured)");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Spotify search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Track>, SpotifyError> {
        let token = self.get_or_refresh_token().await?;

        let url = format!("{}/search", self.api_base_url);
        let limit = super::SEARCH_LIMIT.to_string();
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), body));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        Ok(parsed.tracks.items.into_iter().map(map_track).collect())
    }

    /// Return the cached token, refreshing it when missing or expired.
    ///
    /// Token fetch failure propagates: without a token no search is
    /// possible, so there is no partial result to substitute here.
    async fn get_or_refresh_token(&self) -> Result<String, SpotifyError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SpotifyError::NotConfigured)?;

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!("Fetching Spotify access token");
        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SpotifyError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });

        Ok(access_token)
    }
}

fn map_track(track: SpotifyTrack) -> Track {
    let artist = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Track {
        id: track.id,
        title: track.name,
        artist,
        album: Some(track.album.name),
        image_url: track.album.images.first().map(|i| i.url.clone()),
        // 30-second preview clip; absent for many tracks
        audio_url: track.preview_url,
        source: Source::Spotify,
        duration: Some(track.duration_ms / 1000.0),
        kind: TrackKind::Music,
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "tracks": {
            "items": [
                {
                    "id": "11dFghVXANMlKmJXsNCbNl",
                    "name": "Cut To The Feeling",
                    "artists": [{"name": "Carly Rae Jepsen"}, {"name": "Guest"}],
                    "album": {
                        "name": "Cut To The Feeling",
                        "images": [
                            {"url": "https://i.scdn.co/image/big"},
                            {"url": "https://i.scdn.co/image/small"}
                        ]
                    },
                    "preview_url": "https://p.scdn.co/mp3-preview/abc",
                    "duration_ms": 207959.0
                },
                {
                    "id": "2TpxZ7JUBn3uw46aR7qd6V",
                    "name": "No Preview",
                    "artists": [{"name": "Solo"}],
                    "album": {"name": "LP", "images": []},
                    "preview_url": null,
                    "duration_ms": 60000.0
                }
            ]
        }
    }"#;

    #[test]
    fn maps_search_response_to_tracks() {
        let parsed: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let tracks: Vec<Track> = parsed.tracks.items.into_iter().map(map_track).collect();

        assert_eq!(tracks.len(), 2);
        let first = &tracks[0];
        assert_eq!(first.id, "11dFghVXANMlKmJXsNCbNl");
        assert_eq!(first.artist, "Carly Rae Jepsen, Guest");
        assert_eq!(first.album.as_deref(), Some("Cut To The Feeling"));
        assert_eq!(first.image_url.as_deref(), Some("https://i.scdn.co/image/big"));
        assert_eq!(first.audio_url.as_deref(), Some("https://p.scdn.co/mp3-preview/abc"));
        assert_eq!(first.source, Source::Spotify);
        assert_eq!(first.duration, Some(207_959.0 / 1000.0));

        let second = &tracks[1];
        assert!(second.audio_url.is_none());
        assert!(second.image_url.is_none());
        assert_eq!(second.duration, Some(60.0));
    }

    #[test]
    fn token_expiry_check() {
        let live = CachedToken {
            access_token: "t".into(),
            expires_at: Instant::now() + Duration::from_secs(3600),
        };
        assert!(!live.is_expired());

        let stale = CachedToken {
            access_token: "t".into(),
            expires_at: Instant::now() - Duration::from_secs(1),
        };
        assert!(stale.is_expired());
    }

    #[tokio::test]
    async fn unconfigured_client_searches_empty() {
        let client = SpotifyClient::new(None).unwrap();
        assert!(client.search("anything").await.is_empty());
    }
}
