//! In-memory product catalog.
//!
//! The catalog is an ordered, read-only table of [`CatalogEntry`] rows built
//! once by the [`loader`] and never mutated afterwards. Row positions are
//! contiguous from zero and line up with the rows of the similarity index.

pub mod loader;


use serde::{Deserialize, Serialize};

pub use loader::{CatalogSource, CategoryRecord, DuplicatePolicy, LoadReport, ProductRecord};

/// Default maximum number of catalog rows.
pub const DEFAULT_MAX_ROWS: usize = 50_000;

/// A single product as served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product identifier (ASIN).
    pub asin: String,
    /// Product title, the text the similarity index is built from.
    pub title: String,
    /// Category display name.
    pub category: String,
    /// Unit price.
    pub price: f64,
    /// Product image URL.
    pub img_url: String,
}

impl CatalogEntry {
    /// Price rendered with two decimal places.
    #[must_use]
    pub fn price_display(&self) -> String {
        format!("{:.2}", self.price)
    }
}

/// Ordered catalog table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Wraps already-cleaned entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a row position.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    /// All entries in row order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Iterator over entries in row order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Titles in row order, the corpus fed to the similarity index.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    /// Rows whose category equals `category`, in row order.
    pub fn rows_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.category == category)
            .map(|(row, _)| row)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
