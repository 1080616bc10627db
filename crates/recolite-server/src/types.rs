//! Request and response types for the Recolite HTTP API.

use recolite_core::CatalogEntry;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One product as rendered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EntryResponse {
    /// Product identifier.
    pub asin: String,
    /// Product title.
    pub title: String,
    /// Category name.
    pub category: String,
    /// Price with two decimals.
    #[schema(example = "9.99")]
    pub price: String,
    /// Image URL.
    #[serde(rename = "imgUrl")]
    pub img_url: String,
}

impl From<&CatalogEntry> for EntryResponse {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            asin: entry.asin.clone(),
            title: entry.title.clone(),
            category: entry.category.clone(),
            price: entry.price_display(),
            img_url: entry.img_url.clone(),
        }
    }
}

/// Search result: the best match first, then its recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    /// Matching entries; empty when nothing matched.
    pub results: Vec<EntryResponse>,
}

impl SearchResponse {
    /// Response with no results.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text product query.
    pub query: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` while the process serves requests.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Whether a catalog snapshot is installed.
    pub catalog_loaded: bool,
    /// Products in the current snapshot.
    pub products: usize,
    /// Version of the current snapshot, if any.
    pub catalog_version: Option<u64>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
}
