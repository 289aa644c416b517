//! Internet Archive adapter
//!
//! Two operations with different error contracts:
//! - `search` follows the common adapter contract (never fails publicly)
//! - `resolve` propagates errors, because the caller asked for one specific
//!   item and a silent empty result is not acceptable there
//!
//! Search results carry no `audio_url`: the streaming URL requires a second
//! metadata fetch, which is exactly what `resolve` does.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use streamlite_common::{Source, Track, TrackKind};
use thiserror::Error;

const SEARCH_URL: &str = "https://archive.org/advancedsearch.php";
const METADATA_URL: &str = "https://archive.org/metadata";
const THUMBNAIL_URL: &str = "https://archive.org/services/img";

/// MP3 format labels tried in order before falling back to any `.mp3` file
const FORMAT_PRIORITY: [&str; 3] = ["VBR MP3", "MP3", "128Kbps MP3"];

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid metadata from Internet Archive")]
    InvalidMetadata,

    #[error("No suitable MP3 audio file found for this item")]
    NoAudioFile,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    docs: Vec<ArchiveDoc>,
}

#[derive(Debug, Deserialize)]
struct ArchiveDoc {
    identifier: String,
    title: Option<String>,
    creator: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemMetadata {
    server: Option<String>,
    dir: Option<String>,
    files: Option<Vec<ArchiveFile>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ArchiveFile {
    name: String,
    format: Option<String>,
    /// Duration in seconds, returned by the API as a string
    length: Option<String>,
}

/// Resolved playback info for one archive item. Returned to the client
/// as-is from the resolve endpoint's direct path.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAudio {
    pub audio_url: String,
    pub duration: f64,
    pub source: Source,
    pub id: String,
}

/// Internet Archive client
pub struct ArchiveClient {
    http_client: reqwest::Client,
    search_url: String,
    metadata_url: String,
}

impl ArchiveClient {
    pub fn new() -> Result<Self, ArchiveError> {
        let http_client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(Duration::from_secs(super::PROVIDER_TIMEOUT_SECS))
            .build()
            .map_err(|e| ArchiveError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            search_url: SEARCH_URL.to_string(),
            metadata_url: METADATA_URL.to_string(),
        })
    }

    /// Override endpoint URLs (integration tests)
    #[doc(hidden)]
    pub fn with_base_urls(mut self, search_url: String, metadata_url: String) -> Self {
        self.search_url = search_url;
        self.metadata_url = metadata_url;
        self
    }

    /// Search audio items, collapsing any failure to an empty list.
    pub async fn search(&self, query: &str) -> Vec<Track> {
        match self.try_search(query).await {
            Ok(tracks) => tracks,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Internet Archive search failed");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Track>, ArchiveError> {
        // Audio items only, matched on title or creator
        let q = format!("mediatype:audio AND (title:({query}) OR creator:({query}))");

        let rows = super::SEARCH_LIMIT.to_string();
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[
                ("q", q.as_str()),
                ("fl[]", "identifier"),
                ("fl[]", "title"),
                ("fl[]", "creator"),
                ("fl[]", "mediatype"),
                ("output", "json"),
                ("rows", rows.as_str()),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(|e| ArchiveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArchiveError::Api(status.as_u16(), body));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ArchiveError::Parse(e.to_string()))?;

        Ok(parsed
            .response
            .map(|b| b.docs)
            .unwrap_or_default()
            .into_iter()
            .map(map_doc)
            .collect())
    }

    /// Resolve one archive item to a direct streaming URL.
    ///
    /// Errors propagate to the caller (see module docs).
    pub async fn resolve(&self, id: &str) -> Result<ResolvedAudio, ArchiveError> {
        let url = format!("{}/{}", self.metadata_url, id);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ArchiveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArchiveError::Api(status.as_u16(), body));
        }

        let metadata: ItemMetadata = response
            .json()
            .await
            .map_err(|e| ArchiveError::Parse(e.to_string()))?;

        let (Some(server), Some(dir), Some(files)) =
            (metadata.server, metadata.dir, metadata.files)
        else {
            return Err(ArchiveError::InvalidMetadata);
        };

        let audio_file = pick_audio_file(&files).ok_or(ArchiveError::NoAudioFile)?;

        // Direct streaming URL pattern: https://{server}{dir}/{filename}
        let audio_url = format!("https://{}{}/{}", server, dir, audio_file.name);
        let duration = audio_file
            .length
            .as_deref()
            .and_then(|l| l.parse::<f64>().ok())
            .unwrap_or(0.0);

        tracing::info!(id = %id, file = %audio_file.name, "Resolved Internet Archive item");

        Ok(ResolvedAudio {
            audio_url,
            duration,
            source: Source::InternetArchive,
            id: id.to_string(),
        })
    }
}

/// Select the best audio file: each format label in priority order, then
/// any filename ending in `.mp3`.
fn pick_audio_file(files: &[ArchiveFile]) -> Option<&ArchiveFile> {
    for format in FORMAT_PRIORITY {
        if let Some(file) = files.iter().find(|f| f.format.as_deref() == Some(format)) {
            return Some(file);
        }
    }
    files
        .iter()
        .find(|f| f.name.to_lowercase().ends_with(".mp3"))
}

fn map_doc(doc: ArchiveDoc) -> Track {
    let image_url = format!("{}/{}", THUMBNAIL_URL, doc.identifier);
    Track {
        title: doc.title.unwrap_or_else(|| doc.identifier.clone()),
        artist: doc.creator.unwrap_or_else(|| "Unknown Artist".to_string()),
        album: None,
        image_url: Some(image_url),
        // Streaming URL needs the metadata fetch; see resolve()
        audio_url: None,
        source: Source::InternetArchive,
        duration: None,
        kind: TrackKind::Music,
        description: None,
        id: doc.identifier,
    }
}
