//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use recolite_core::{CatalogSource, CatalogStore, DataConfig, RecommendConfig};
use recolite_server::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PRODUCTS: &str = "\
asin,title,imgUrl,productURL,stars,reviews,price,listPrice,category_id,isBestSeller,boughtInLastMonth
A1,wireless mouse,u1,https://example.com/A1,4.5,10,9.99,0,1,False,0
A2,wireless keyboard,u2,https://example.com/A2,4.1,3,19.99,0,1,False,0
A3,garden hose,u3,https://example.com/A3,3.8,7,5,0,2,True,50
";

pub const CATEGORIES: &str = "id,category_name\n1,Electronics\n2,Garden\n";

/// Writes the fixture CSVs into `temp_dir`.
pub fn write_fixtures(temp_dir: &TempDir) {
    std::fs::write(temp_dir.path().join("amazon_sample_products.csv"), PRODUCTS)
        .expect("Failed to write products");
    std::fs::write(temp_dir.path().join("amazon_sample_category.csv"), CATEGORIES)
        .expect("Failed to write categories");
}

/// State over `temp_dir` with a fixed seed. The catalog is not loaded.
pub fn create_test_state(temp_dir: &TempDir) -> Arc<AppState> {
    let data = DataConfig {
        dir: temp_dir.path().to_path_buf(),
        ..DataConfig::default()
    };
    let recommend = RecommendConfig {
        seed: Some(7),
        ..RecommendConfig::default()
    };
    let store = Arc::new(CatalogStore::new(CatalogSource::from_config(&data)));
    Arc::new(AppState::with_store(store, &recommend))
}

/// Router over fixture files in `temp_dir`.
pub fn create_test_app(temp_dir: &TempDir) -> (Router, Arc<AppState>) {
    write_fixtures(temp_dir);
    let state = create_test_state(temp_dir);
    (build_router(Arc::clone(&state)), state)
}

/// Sends a GET and returns status plus body bytes.
pub async fn get(app: Router, uri: &str) -> (axum::http::StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, body.to_vec())
}

/// Sends a GET and parses the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (axum::http::StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json: Value = serde_json::from_slice(&body).expect("Invalid JSON");
    (status, json)
}
