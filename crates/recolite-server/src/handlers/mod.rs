//! HTTP handlers for the Recolite server.
//!
//! This module organizes handlers by concern:
//! - `pages`: HTML trending and search pages
//! - `search`: JSON search with recommendations
//! - `health`: Liveness and catalog status
//! - `metrics`: Prometheus metrics and the OpenAPI document

pub mod health;
pub mod helpers;
pub mod metrics;
pub mod pages;
pub mod search;

pub use health::health_check;
pub use metrics::{openapi_json, prometheus_metrics};
pub use pages::{home, search_page};
pub use search::ajax_search;
