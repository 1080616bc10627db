//! HTTP API integration tests.

mod common;

use axum::http::StatusCode;
use common::{create_test_app, create_test_state, get, get_json};
use recolite_server::build_router;
use serde_json::Value;
use tempfile::TempDir;

fn asins(json: &Value) -> Vec<String> {
    json["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|e| e["asin"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_blank_query_returns_empty_results() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, state) = create_test_app(&temp_dir);

    for uri in ["/ajax_search/", "/ajax_search/?query=", "/ajax_search/?query=%20%20"] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "results": [] }));
    }
    // blank queries never touch the catalog
    assert!(!state.store.is_loaded());
}

#[tokio::test]
async fn test_search_builds_catalog_lazily() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, state) = create_test_app(&temp_dir);
    assert!(!state.store.is_loaded());

    let (status, json) = get_json(app, "/ajax_search/?query=wireless").await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.store.is_loaded());

    let ids = asins(&json);
    assert!(ids[0] == "A1" || ids[0] == "A2");
    assert!(ids[1..].iter().all(|id| id != &ids[0]));
}

#[tokio::test]
async fn test_search_entry_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, _state) = create_test_app(&temp_dir);

    let (_, json) = get_json(app, "/ajax_search/?query=garden%20hose").await;
    let first = &json["results"][0];
    assert_eq!(first["asin"], "A3");
    assert_eq!(first["title"], "garden hose");
    assert_eq!(first["category"], "Garden");
    assert_eq!(first["price"], "5.00");
    assert_eq!(first["imgUrl"], "u3");
    // the only Garden product has no category peers
    let len = json["results"].as_array().unwrap().len();
    assert!(len == 1 || len == 3);
}

#[tokio::test]
async fn test_search_without_sources_returns_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let state = create_test_state(&temp_dir);
    let app = build_router(state.clone());

    let (status, json) = get_json(app, "/ajax_search/?query=wireless").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"].as_array().unwrap().len(), 0);
    assert!(!state.store.is_loaded());
}

#[tokio::test]
async fn test_home_lists_trending_products() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, state) = create_test_app(&temp_dir);

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Trending products"));
    for title in ["wireless mouse", "wireless keyboard", "garden hose"] {
        assert!(html.contains(title), "missing {title}");
    }
    assert!(state.store.is_loaded());
}

#[tokio::test]
async fn test_home_without_sources_renders_empty_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let app = build_router(create_test_state(&temp_dir));

    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("No products available."));
}

#[tokio::test]
async fn test_search_page_served() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, _state) = create_test_app(&temp_dir);

    let (status, body) = get(app, "/search/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("/ajax_search/"));
}

#[tokio::test]
async fn test_health_reports_catalog_state() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, state) = create_test_app(&temp_dir);

    let (status, json) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["catalog_loaded"], false);
    assert_eq!(json["catalog_version"], Value::Null);

    state.store.reload().expect("reload");
    let (_, json) = get_json(app, "/health").await;
    assert_eq!(json["catalog_loaded"], true);
    assert_eq!(json["products"], 3);
    assert_eq!(json["catalog_version"], 1);
}

#[tokio::test]
async fn test_metrics_count_searches() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, _state) = create_test_app(&temp_dir);

    get_json(app.clone(), "/ajax_search/?query=mouse").await;
    get_json(app.clone(), "/ajax_search/?query=hose").await;

    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("recolite_up 1"));
    assert!(text.contains("recolite_searches_total 2"));
    assert!(text.contains("recolite_catalog_builds_total 1"));
    assert!(text.contains("recolite_catalog_products 3"));
}

#[tokio::test]
async fn test_openapi_document_lists_search() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (app, _state) = create_test_app(&temp_dir);

    let (status, json) = get_json(app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["paths"]["/ajax_search/"].is_object());
    assert!(json["paths"]["/health"].is_object());
}
