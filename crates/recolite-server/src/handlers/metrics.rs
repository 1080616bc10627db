//! Prometheus metrics and OpenAPI document handlers.

use std::fmt::Write;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::{ApiDoc, AppState};

/// Prometheus text format metrics response.
///
/// Metrics exposed:
/// - `recolite_info`: Server version info
/// - `recolite_up`: Always 1 while serving
/// - search, strategy and catalog build counters
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain")
    ),
    tag = "metrics"
)]
pub async fn prometheus_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut output = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(output, "# HELP recolite_info Recolite server information");
    let _ = writeln!(output, "# TYPE recolite_info gauge");
    let _ = writeln!(
        output,
        "recolite_info{{version=\"{}\"}} 1",
        env!("CARGO_PKG_VERSION")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "# HELP recolite_up Recolite server is up and running");
    let _ = writeln!(output, "# TYPE recolite_up gauge");
    let _ = writeln!(output, "recolite_up 1");
    let _ = writeln!(output);

    output.push_str(&state.metrics().export_prometheus());

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        output,
    )
}

/// The OpenAPI document as JSON.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
