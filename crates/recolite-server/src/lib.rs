#![allow(clippy::doc_markdown)]
//! Recolite Server - HTTP front end for the Recolite product recommender.
//!
//! Serves the trending page, the search page and the JSON search endpoint
//! over a shared [`CatalogStore`].

pub mod handlers;
pub mod render;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use recolite_core::{
    CatalogSource, CatalogStore, OperationalMetrics, QueryOptions, RecoliteConfig,
    RecommendConfig,
};
use utoipa::OpenApi;

pub use handlers::{ajax_search, health_check, home, openapi_json, prometheus_metrics, search_page};
pub use types::{EntryResponse, ErrorResponse, HealthResponse, SearchParams, SearchResponse};

/// Application state shared across handlers.
pub struct AppState {
    /// Current catalog snapshot and its rebuild lock.
    pub store: Arc<CatalogStore>,
    /// Recommendation count and best-match floor.
    pub options: QueryOptions,
    /// Size of the trending sample on the home page.
    pub trending_size: usize,
    /// Process-wide randomness for strategy picks and samples.
    pub rng: Mutex<StdRng>,
}

impl AppState {
    /// State with a fresh, not yet loaded store built from `config`.
    #[must_use]
    pub fn from_config(config: &RecoliteConfig) -> Self {
        let store = CatalogStore::new(CatalogSource::from_config(&config.data));
        Self::with_store(Arc::new(store), &config.recommend)
    }

    /// State around an existing store.
    #[must_use]
    pub fn with_store(store: Arc<CatalogStore>, recommend: &RecommendConfig) -> Self {
        let rng = match recommend.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            options: QueryOptions::from(recommend),
            trending_size: recommend.trending_size,
            rng: Mutex::new(rng),
        }
    }

    /// Operational counters shared with the store.
    #[must_use]
    pub fn metrics(&self) -> &Arc<OperationalMetrics> {
        self.store.metrics()
    }
}

/// OpenAPI documentation for the Recolite JSON endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recolite API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Product search and recommendation endpoints"
    ),
    paths(
        handlers::search::ajax_search,
        handlers::health::health_check,
        handlers::metrics::prometheus_metrics,
    ),
    components(schemas(EntryResponse, SearchResponse, HealthResponse, ErrorResponse)),
    tags(
        (name = "search", description = "Product search with recommendations"),
        (name = "health", description = "Liveness and catalog status"),
        (name = "metrics", description = "Prometheus metrics"),
    )
)]
pub struct ApiDoc;

/// Builds the router with every route.
///
/// Outer layers (CORS, tracing) are added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/search/", get(search_page))
        .route("/ajax_search/", get(ajax_search))
        .route("/health", get(health_check))
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}
