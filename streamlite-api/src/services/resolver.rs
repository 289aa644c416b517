//! Track resolution matching policy
//!
//! Given a `(title, artist)` pair the resolver searches Audius and picks a
//! playable candidate by an ordered rule chain, first satisfied rule wins:
//!
//! 1. Best match: first candidate whose normalized title contains the
//!    normalized target title, or vice versa. Artist is normalized into the
//!    search query but deliberately not used in the containment test;
//!    changing that would change observable matching behavior.
//! 2. Best guess: non-empty results with no containment hit return the
//!    first result unconditionally.
//! 3. Not found: empty results yield a sentinel, not an error.

use crate::services::AudiusClient;
use serde::Serialize;
use streamlite_common::{normalize, Track};

/// Narrowed projection of a matched track; `id` travels as `audius_id`
/// because that is the identifier a client must feed back for playback.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedTrack {
    pub audio_url: Option<String>,
    pub audius_id: String,
    pub duration: Option<f64>,
}

/// Outcome of the fuzzy resolution path
#[derive(Debug, Clone)]
pub enum Resolution {
    Matched(ResolvedTrack),
    NotFound,
}

/// Resolve a `(title, artist)` pair against Audius.
pub async fn resolve_track(audius: &AudiusClient, title: &str, artist: &str) -> Resolution {
    let query = format!("{} {}", normalize(title), normalize(artist));
    tracing::debug!(title = %title, artist = %artist, query = %query, "Resolving audio");

    let results = audius.search(&query).await;

    match select_best_match(title, &results) {
        Some(track) => {
            tracing::info!(
                matched_title = %track.title,
                matched_artist = %track.artist,
                "Resolve match found"
            );
            Resolution::Matched(ResolvedTrack {
                audio_url: track.audio_url.clone(),
                audius_id: track.id.clone(),
                duration: track.duration,
            })
        }
        None => {
            tracing::info!(title = %title, artist = %artist, "No Audius match found");
            Resolution::NotFound
        }
    }
}

/// Apply the ordered matching rules to a candidate list.
///
/// Candidate order is preserved from the adapter's response order; both the
/// containment rule and the best-guess fallback take the first qualifying
/// entry.
fn select_best_match<'a>(title: &str, candidates: &'a [Track]) -> Option<&'a Track> {
    let target = normalize(title);

    let best = candidates.iter().find(|track| {
        let candidate = normalize(&track.title);
        candidate.contains(&target) || target.contains(&candidate)
    });

    best.or_else(|| {
        if !candidates.is_empty() {
            tracing::debug!("No containment match, returning best guess (first result)");
        }
        candidates.first()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamlite_common::{Source, TrackKind};

    fn audius_track(id: &str, title: &str) -> Track {
        Track {
            id: id.to_string(),
            title: title.to_string(),
            artist: "someone".to_string(),
            album: Some("Audius Single".to_string()),
            image_url: None,
            audio_url: Some(format!("https://node.example/v1/tracks/{id}/stream")),
            source: Source::Audius,
            duration: Some(180.0),
            kind: TrackKind::Music,
            description: None,
        }
    }

    #[test]
    fn containment_matches_both_directions() {
        // Candidate title contains the target
        let candidates = vec![
            audius_track("a", "Unrelated"),
            audius_track("b", "Blue Suede Shoes (Live 1956)"),
        ];
        let hit = select_best_match("blue suede shoes", &candidates).unwrap();
        assert_eq!(hit.id, "b");

        // Target contains the candidate title
        let candidates = vec![audius_track("c", "Suede Shoes")];
        let hit = select_best_match("Blue Suede Shoes!", &candidates).unwrap();
        assert_eq!(hit.id, "c");
    }

    #[test]
    fn skips_non_matching_candidates_before_first_hit() {
        let candidates = vec![
            audius_track("x", "Something Else Entirely"),
            audius_track("y", "Hound Dog"),
            audius_track("z", "Hound Dog (Remaster)"),
        ];
        // First satisfying candidate wins, not the "best" one
        let hit = select_best_match("hound dog remaster", &candidates).unwrap();
        assert_eq!(hit.id, "y");
    }

    #[test]
    fn falls_back_to_first_result_deterministically() {
        let candidates = vec![
            audius_track("first", "Completely Different"),
            audius_track("second", "Also Different"),
        ];
        let hit = select_best_match("jailhouse rock", &candidates).unwrap();
        assert_eq!(hit.id, "first");
    }

    #[test]
    fn empty_results_mean_not_found() {
        assert!(select_best_match("anything", &[]).is_none());
    }

    #[tokio::test]
    async fn unreachable_audius_resolves_to_not_found() {
        let audius = AudiusClient::new("http://127.0.0.1:9/v1".to_string()).unwrap();
        let outcome = resolve_track(&audius, "Blue Suede Shoes", "Elvis Presley").await;
        assert!(matches!(outcome, Resolution::NotFound));
    }
}
