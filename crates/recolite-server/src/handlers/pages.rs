//! HTML page handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};
use recolite_core::QueryService;

use crate::render;
use crate::AppState;

use super::helpers::internal_error;

/// Home page with a random sample of trending products.
///
/// Builds the catalog first if it is not loaded yet. If the build fails the
/// page renders with no products.
pub async fn home(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let result = tokio::task::spawn_blocking(move || {
        let Some(snapshot) = state.store.snapshot_or_reload() else {
            return render::home_page(&[]);
        };
        let service = QueryService::new(&snapshot, state.options);
        let trending = {
            let mut rng = state.rng.lock();
            service.trending(state.trending_size, &mut *rng)
        };
        render::home_page(&trending)
    })
    .await;

    match result {
        Ok(page) => Html(page).into_response(),
        Err(e) => internal_error("Home page", &e).into_response(),
    }
}

/// Search page; the browser queries `/ajax_search/`.
pub async fn search_page() -> impl IntoResponse {
    Html(render::search_page())
}
