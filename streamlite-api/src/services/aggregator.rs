//! Aggregating search
//!
//! Fan-out/fan-in over the local catalog and all three provider adapters,
//! with no partial short-circuit: adapters cannot fail (their boundary
//! collapses errors to empty lists), so the only failure mode here is a
//! catalog query error, which fails the whole request.

use crate::AppState;
use streamlite_common::Track;

/// Run the concurrent multi-source search and merge results.
///
/// Merge order is fixed concatenation, no cross-source re-ranking:
/// local songs, local podcasts, Spotify, Audius, Internet Archive.
pub async fn aggregate_search(state: &AppState, query: &str) -> Result<Vec<Track>, sqlx::Error> {
    let (songs, podcasts, spotify, audius, archive) = tokio::join!(
        state.catalog.search_songs(query),
        state.catalog.search_podcasts(query),
        state.spotify.search(query),
        state.audius.search(query),
        state.archive.search(query),
    );

    let songs = songs?;
    let podcasts = podcasts?;

    tracing::debug!(
        local_songs = songs.len(),
        local_podcasts = podcasts.len(),
        spotify = spotify.len(),
        audius = audius.len(),
        internet_archive = archive.len(),
        "Aggregate search settled"
    );

    let mut merged =
        Vec::with_capacity(songs.len() + podcasts.len() + spotify.len() + audius.len() + archive.len());
    merged.extend(songs);
    merged.extend(podcasts);
    merged.extend(spotify);
    merged.extend(audius);
    merged.extend(archive);

    Ok(merged)
}
