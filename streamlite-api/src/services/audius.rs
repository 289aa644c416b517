//! Audius search adapter
//!
//! Talks to a discovery-provider node. The streaming URL is not part of the
//! search response; it is synthesized from the node's `/tracks/{id}/stream`
//! route.

use serde::Deserialize;
use std::time::Duration;
use streamlite_common::{Source, Track, TrackKind};
use thiserror::Error;

/// App name registered with Audius discovery providers
const APP_NAME: &str = "StreamLite";

#[derive(Debug, Error)]
pub enum AudiusError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<AudiusTrack>>,
}

#[derive(Debug, Deserialize)]
struct AudiusTrack {
    id: String,
    title: String,
    user: AudiusUser,
    artwork: Option<AudiusArtwork>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AudiusUser {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AudiusArtwork {
    #[serde(rename = "480x480")]
    large: Option<String>,
    #[serde(rename = "150x150")]
    small: Option<String>,
}

/// Audius discovery-provider client
pub struct AudiusClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AudiusClient {
    pub fn new(base_url: String) -> Result<Self, AudiusError> {
        let http_client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(Duration::from_secs(super::PROVIDER_TIMEOUT_SECS))
            .build()
            .map_err(|e| AudiusError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Search Audius tracks, collapsing any failure to an empty list.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        match self.try_search(query).await {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Audius search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Track>, AudiusError> {
        let url = format!("{}/tracks/search", self.base_url);
        let limit = super::SEARCH_LIMIT.to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("query", query),
                ("app_name", APP_NAME),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AudiusError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AudiusError::Api(status.as_u16(), body));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AudiusError::Parse(e.to_string()))?;

        Ok(parsed
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|t| map_track(t, &self.base_url))
            .collect())
    }
}

fn map_track(track: AudiusTrack, base_url: &str) -> Track {
    let image_url = track
        .artwork
        .and_then(|a| a.large.or(a.small));
    let audio_url = format!("{}/tracks/{}/stream", base_url, track.id);

    Track {
        id: track.id,
        title: track.title,
        artist: track.user.name,
        album: Some("Audius Single".to_string()),
        image_url,
        audio_url: Some(audio_url),
        source: Source::Audius,
        duration: track.duration,
        kind: TrackKind::Music,
        description: None,
    }
}
