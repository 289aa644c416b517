//! The unified track model
//!
//! Every provider adapter and the local catalog map their wire formats into
//! `Track`. A track is a value object: built fresh per request, never
//! mutated, never persisted by this service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a track. Determines how `id` and `audio_url` must be
/// interpreted downstream; `(id, source)` is the unique key within an
/// aggregate result, `id` alone is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Local,
    Spotify,
    Audius,
    InternetArchive,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Local => "local",
            Self::Spotify => "spotify",
            Self::Audius => "audius",
            Self::InternetArchive => "internet_archive",
        };
        f.write_str(s)
    }
}

/// Kind of playable item. Defaults to music; only local catalog rows carry
/// podcasts today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    #[default]
    Music,
    Podcast,
}

/// One playable item, regardless of origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Provider-scoped identifier (not globally unique across sources)
    pub id: String,
    /// Track title
    pub title: String,
    /// Performer name; comma-joined when multiple performers
    pub artist: String,
    /// Album title (absent for some providers)
    pub album: Option<String>,
    /// Artwork/thumbnail URL
    pub image_url: Option<String>,
    /// Direct or streaming playback URL; may be absent (e.g. preview-only)
    pub audio_url: Option<String>,
    /// Origin tag
    pub source: Source,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Music or podcast
    #[serde(rename = "type", default)]
    pub kind: TrackKind,
    /// Podcast description (local podcast rows only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Source::InternetArchive).unwrap(),
            json!("internet_archive")
        );
        assert_eq!(serde_json::to_value(Source::Local).unwrap(), json!("local"));
    }

    #[test]
    fn kind_defaults_to_music_on_deserialize() {
        let track: Track = serde_json::from_value(json!({
            "id": "x1",
            "title": "T",
            "artist": "A",
            "album": null,
            "image_url": null,
            "audio_url": null,
            "source": "audius",
            "duration": 180.0
        }))
        .unwrap();
        assert_eq!(track.kind, TrackKind::Music);
    }

    #[test]
    fn track_json_shape() {
        let track = Track {
            id: "abc".into(),
            title: "Song".into(),
            artist: "Band".into(),
            album: Some("LP".into()),
            image_url: None,
            audio_url: Some("https://example.com/a.mp3".into()),
            source: Source::Spotify,
            duration: Some(30.0),
            kind: TrackKind::Music,
            description: None,
        };
        let v = serde_json::to_value(&track).unwrap();
        assert_eq!(v["source"], "spotify");
        assert_eq!(v["type"], "music");
        assert_eq!(v["audio_url"], "https://example.com/a.mp3");
        // description is omitted entirely when absent
        assert!(v.get("description").is_none());
    }
}
