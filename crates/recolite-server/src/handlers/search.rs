//! JSON search handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use recolite_core::QueryService;

use crate::types::{EntryResponse, SearchParams, SearchResponse};
use crate::AppState;

use super::helpers::non_blank;

/// Best match for a free-text query followed by its recommendations.
///
/// Blank queries, an unavailable catalog and internal failures all yield
/// `{"results": []}`.
#[utoipa::path(
    get,
    path = "/ajax_search/",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Best match and recommendations", body = SearchResponse)
    )
)]
pub async fn ajax_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let Some(query) = non_blank(params.query.as_deref()).map(str::to_owned) else {
        return Json(SearchResponse::empty());
    };

    let result = tokio::task::spawn_blocking(move || run_search(&state, &query)).await;

    match result {
        Ok(response) => Json(response),
        Err(e) => {
            tracing::error!(error = %e, "Search task failed");
            Json(SearchResponse::empty())
        }
    }
}

fn run_search(state: &AppState, query: &str) -> SearchResponse {
    let Some(snapshot) = state.store.snapshot_or_reload() else {
        tracing::warn!("Search requested but no catalog is available");
        state.metrics().record_search(false);
        return SearchResponse::empty();
    };

    let service = QueryService::new(&snapshot, state.options);
    let outcome = {
        let mut rng = state.rng.lock();
        service.search(query, &mut *rng)
    };

    let Some(outcome) = outcome else {
        tracing::debug!(query, "No match");
        state.metrics().record_search(false);
        return SearchResponse::empty();
    };

    state.metrics().record_search(true);
    state.metrics().record_strategy(outcome.strategy);
    SearchResponse {
        results: outcome.results().into_iter().map(EntryResponse::from).collect(),
    }
}
