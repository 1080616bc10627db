//! # Recolite Core
//!
//! Product recommendations over a static catalog using TF-IDF title
//! similarity.
//!
//! ## Features
//!
//! - **Catalog loading**: typed CSV join of products and categories
//! - **Similarity index**: sparse TF-IDF rows, cosine nearest neighbors
//! - **Two strategies**: same-category sampling and title similarity
//! - **Atomic snapshots**: readers never see a half-rebuilt catalog
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recolite_core::{CatalogSource, CatalogStore, QueryOptions, QueryService};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = CatalogStore::new(CatalogSource::new(
//!         "data/amazon_sample_products.csv",
//!         "data/amazon_sample_category.csv",
//!     ));
//!     let snapshot = store.reload()?;
//!
//!     let service = QueryService::new(&snapshot, QueryOptions::default());
//!     let mut rng = rand::thread_rng();
//!     if let Some(outcome) = service.search("wireless mouse", &mut rng) {
//!         println!("{} via {}", outcome.matched.title, outcome.strategy);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation
    )
)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod index;
pub mod metrics;
pub mod query;
pub mod store;
pub mod strategy;
#[cfg(test)]
mod strategy_tests;
pub mod text;

pub use catalog::{Catalog, CatalogEntry, CatalogSource, DuplicatePolicy, LoadReport};
pub use config::{
    ConfigError, DataConfig, LoggingConfig, RecoliteConfig, RecommendConfig, ServerConfig,
};
pub use error::{Error, Result};
pub use index::{Neighbor, SimilarityIndex, SparseVector, TfidfVectorizer};
pub use metrics::OperationalMetrics;
pub use query::{QueryOptions, QueryService, Recommendation, SearchOutcome};
pub use store::{CatalogSnapshot, CatalogStore};
pub use strategy::{category_strategy, similarity_strategy, Strategy};
