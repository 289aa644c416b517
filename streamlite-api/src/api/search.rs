//! Global search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use streamlite_common::Track;

use crate::error::{ApiError, ApiResult};
use crate::services::aggregate_search;
use crate::AppState;

/// Query parameters for global search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free-text query; required and non-empty
    pub q: Option<String>,
}

/// GET /api/search?q=term
///
/// Fans out to the local catalog and all providers, returns the merged
/// list. 400 when `q` is missing or blank (no adapter is invoked), 500
/// only when the local catalog query fails; provider failures degrade to
/// empty partial lists inside the adapters.
pub async fn global_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Track>>> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'q' is required".to_string(),
        ));
    }

    tracing::info!(query = %query, "Global search");
    let results = aggregate_search(&state, query).await?;
    Ok(Json(results))
}
