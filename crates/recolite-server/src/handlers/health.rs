//! Health check handler.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::types::HealthResponse;
use crate::AppState;

/// Health check endpoint.
///
/// Reports catalog status without triggering a build.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.store.snapshot();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_loaded: snapshot.is_some(),
        products: snapshot.as_ref().map_or(0, |s| s.len()),
        catalog_version: snapshot.as_ref().map(|s| s.version()),
    })
}
