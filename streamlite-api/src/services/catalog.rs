//! Local catalog queries
//!
//! The catalog is a narrow collaborator: case-insensitive title substring
//! search over `songs` and `podcasts`, limit 10. Rows are reshaped into
//! `Track` inline (`song_url` → `audio_url`, `publisher` → `artist`).
//! Unlike the provider adapters, catalog failures propagate: a broken
//! local store fails the whole search request.

use sqlx::SqlitePool;
use streamlite_common::{Source, Track, TrackKind};

#[derive(Debug, sqlx::FromRow)]
struct SongRow {
    id: String,
    title: String,
    artist: String,
    album: Option<String>,
    image_url: Option<String>,
    song_url: Option<String>,
    duration: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct PodcastRow {
    id: String,
    title: String,
    publisher: Option<String>,
    image_url: Option<String>,
    description: Option<String>,
}

/// Local catalog store backed by SQLite
#[derive(Clone)]
pub struct CatalogStore {
    db: SqlitePool,
}

impl CatalogStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Case-insensitive title substring search over songs
    pub async fn search_songs(&self, query: &str) -> Result<Vec<Track>, sqlx::Error> {
        let pattern = like_pattern(query);
        let rows: Vec<SongRow> = sqlx::query_as(
            "SELECT id, title, artist, album, image_url, song_url, duration
             FROM songs WHERE title LIKE ? LIMIT ?",
        )
        .bind(&pattern)
        .bind(super::SEARCH_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(song_to_track).collect())
    }

    /// Case-insensitive title substring search over podcasts
    pub async fn search_podcasts(&self, query: &str) -> Result<Vec<Track>, sqlx::Error> {
        let pattern = like_pattern(query);
        let rows: Vec<PodcastRow> = sqlx::query_as(
            "SELECT id, title, publisher, image_url, description
             FROM podcasts WHERE title LIKE ? LIMIT ?",
        )
        .bind(&pattern)
        .bind(super::SEARCH_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(podcast_to_track).collect())
    }
}

/// SQLite LIKE is case-insensitive for ASCII, matching the hosted
/// store's ilike filter
fn like_pattern(query: &str) -> String {
    format!("%{query}%")
}

fn song_to_track(row: SongRow) -> Track {
    Track {
        id: row.id,
        title: row.title,
        artist: row.artist,
        album: row.album,
        image_url: row.image_url,
        audio_url: row.song_url,
        source: Source::Local,
        duration: row.duration,
        kind: TrackKind::Music,
        description: None,
    }
}

fn podcast_to_track(row: PodcastRow) -> Track {
    Track {
        id: row.id,
        title: row.title,
        // Publisher stands in for artist so the UI renders one shape
        artist: row.publisher.unwrap_or_default(),
        album: None,
        image_url: row.image_url,
        audio_url: None,
        source: Source::Local,
        duration: None,
        kind: TrackKind::Podcast,
        description: row.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn seeded_store() -> CatalogStore {
        let pool = db::connect_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO songs (id, title, artist, album, image_url, song_url, duration) VALUES
             ('s1', 'Midnight Train', 'The Locals', 'First LP', NULL, 'https://cdn.example/s1.mp3', 201.0),
             ('s2', 'Night Drive', 'Neon', NULL, NULL, 'https://cdn.example/s2.mp3', 188.5),
             ('s3', 'Morning Light', 'Neon', NULL, NULL, NULL, NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO podcasts (id, title, publisher, image_url, description) VALUES
             ('p1', 'Night Owls Radio', 'Owl Media', NULL, 'Late night talk')",
        )
        .execute(&pool)
        .await
        .unwrap();
        CatalogStore::new(pool)
    }

    #[tokio::test]
    async fn song_search_is_case_insensitive_substring() {
        let store = seeded_store().await;
        let tracks = store.search_songs("NIGHT").await.unwrap();
        let titles: Vec<&str> = tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Midnight Train", "Night Drive"]);
        assert!(tracks.iter().all(|t| t.source == Source::Local));
        assert_eq!(
            tracks[0].audio_url.as_deref(),
            Some("https://cdn.example/s1.mp3")
        );
    }

    #[tokio::test]
    async fn podcast_rows_reshape_publisher_to_artist() {
        let store = seeded_store().await;
        let tracks = store.search_podcasts("night").await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist, "Owl Media");
        assert_eq!(tracks[0].kind, TrackKind::Podcast);
        assert_eq!(tracks[0].description.as_deref(), Some("Late night talk"));
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        let store = seeded_store().await;
        assert!(store.search_songs("zzzz").await.unwrap().is_empty());
    }
}
