//! Audio resolution endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use streamlite_common::Source;

use crate::error::{ApiError, ApiResult};
use crate::services::resolver::ResolvedTrack;
use crate::services::{resolve_track, Resolution, ResolvedAudio};
use crate::AppState;

/// Resolve request body. Two shapes share one struct: a direct
/// `{id, source}` lookup (Internet Archive only) checked first, else the
/// fuzzy `{title, artist}` path.
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub id: Option<String>,
    pub source: Option<Source>,
}

/// Resolve response. The direct path echoes the resolved archive item
/// unchanged; the fuzzy path returns the narrowed Audius projection; an
/// empty result set is a 200 with a sentinel, not an error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    Archive(ResolvedAudio),
    Matched(ResolvedTrack),
    NotFound { error: &'static str },
}

/// POST /api/resolve
pub async fn resolve_audio(
    State(state): State<AppState>,
    Json(request): Json<ResolveRequest>,
) -> ApiResult<Json<ResolveResponse>> {
    // Direct path: explicit item lookup, errors propagate
    if let (Some(id), Some(Source::InternetArchive)) = (&request.id, request.source) {
        let resolved = state.archive.resolve(id).await?;
        return Ok(Json(ResolveResponse::Archive(resolved)));
    }

    let title = request.title.as_deref().map(str::trim).unwrap_or_default();
    let artist = request.artist.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() || artist.is_empty() {
        return Err(ApiError::BadRequest("Title and Artist required".to_string()));
    }

    tracing::info!(title = %title, artist = %artist, "Resolving audio");

    match resolve_track(&state.audius, title, artist).await {
        Resolution::Matched(track) => Ok(Json(ResolveResponse::Matched(track))),
        Resolution::NotFound => Ok(Json(ResolveResponse::NotFound { error: "NOT_FOUND" })),
    }
}
