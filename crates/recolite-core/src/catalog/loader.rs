//! CSV catalog loader.
//!
//! Builds the catalog with an explicit pipeline over typed records:
//!
//! 1. read categories into an `id -> name` map
//! 2. stream products in file order, inner-joining on `category_id`
//! 3. drop rows with a missing projected value
//! 4. apply the [`DuplicatePolicy`] to repeated identifiers
//! 5. stop once `max_rows` rows are kept

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogEntry, DEFAULT_MAX_ROWS};
use crate::config::DataConfig;
use crate::error::{Error, Result};

/// Columns the products file must provide.
pub const PRODUCT_COLUMNS: [&str; 5] = ["asin", "title", "imgUrl", "price", "category_id"];

/// Columns the categories file must provide.
pub const CATEGORY_COLUMNS: [&str; 2] = ["id", "category_name"];

/// Markers read as missing values, matching the usual dataframe NA set.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How repeated product identifiers are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the build on the first repeated identifier.
    #[default]
    Reject,
    /// Keep the first row for an identifier and drop later ones.
    KeepFirst,
}

/// A raw row of the products file. Unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
    /// Product identifier.
    pub asin: Option<String>,
    /// Product title.
    pub title: Option<String>,
    /// Image URL.
    #[serde(rename = "imgUrl")]
    pub img_url: Option<String>,
    /// Unit price; unparsable values read as missing.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    /// Foreign key into the categories file.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub category_id: Option<i64>,
}

/// A raw row of the categories file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    /// Category key.
    #[serde(deserialize_with = "csv::invalid_option")]
    pub id: Option<i64>,
    /// Display name.
    pub category_name: Option<String>,
}

/// Counters describing one catalog build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Product rows read from the source.
    pub products_read: usize,
    /// Category mappings accepted.
    pub categories: usize,
    /// Product rows with no matching category.
    pub unmatched: usize,
    /// Joined rows dropped for a missing value.
    pub incomplete: usize,
    /// Rows dropped as repeated identifiers under [`DuplicatePolicy::KeepFirst`].
    pub duplicates: usize,
    /// True if reading stopped at the row cap.
    pub truncated: bool,
    /// Rows in the resulting catalog.
    pub rows: usize,
}

/// Location and limits of the two catalog input files.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    /// Products CSV path.
    pub products: PathBuf,
    /// Categories CSV path.
    pub categories: PathBuf,
    /// Row cap applied after join and cleaning.
    pub max_rows: usize,
    /// Handling of repeated identifiers.
    pub duplicate_policy: DuplicatePolicy,
}

impl CatalogSource {
    /// Source with default limits.
    pub fn new(products: impl Into<PathBuf>, categories: impl Into<PathBuf>) -> Self {
        Self {
            products: products.into(),
            categories: categories.into(),
            max_rows: DEFAULT_MAX_ROWS,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    /// Source described by the `[data]` configuration section.
    #[must_use]
    pub fn from_config(config: &DataConfig) -> Self {
        Self {
            products: config.products_path(),
            categories: config.categories_path(),
            max_rows: config.max_rows,
            duplicate_policy: config.duplicate_policy,
        }
    }

    /// Overrides the row cap.
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Overrides the duplicate policy.
    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Reads both files and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceMissing`] if either file does not exist, and
    /// CSV or IO errors if a file cannot be read. Nothing is built in that case.
    pub fn load(&self) -> Result<(Catalog, LoadReport)> {
        for path in [&self.products, &self.categories] {
            if !path.exists() {
                return Err(Error::SourceMissing(path.clone()));
            }
        }

        let start = Instant::now();
        let products = File::open(&self.products)?;
        let categories = File::open(&self.categories)?;
        let (catalog, report) = load_from_readers(
            products,
            &self.products,
            categories,
            &self.categories,
            self.max_rows,
            self.duplicate_policy,
        )?;

        tracing::info!(
            rows = report.rows,
            products_read = report.products_read,
            unmatched = report.unmatched,
            incomplete = report.incomplete,
            duplicates = report.duplicates,
            truncated = report.truncated,
            elapsed_ms = start.elapsed().as_millis(),
            "Catalog loaded"
        );
        Ok((catalog, report))
    }
}

/// Builds a catalog from any two CSV readers.
///
/// The paths are only used in error messages.
pub fn load_from_readers<P: Read, C: Read>(
    products: P,
    products_path: &Path,
    categories: C,
    categories_path: &Path,
    max_rows: usize,
    policy: DuplicatePolicy,
) -> Result<(Catalog, LoadReport)> {
    let categories = read_categories(categories, categories_path)?;

    let mut reader = csv::Reader::from_reader(products);
    check_columns(&mut reader, products_path, &PRODUCT_COLUMNS)?;
    let records = reader
        .into_deserialize::<ProductRecord>()
        .map(|row| row.map_err(|e| csv_error(products_path, e)));

    build_catalog(records, &categories, max_rows, policy)
}

/// Reads the categories file into an `id -> name` map. The first mapping
/// for an id wins.
fn read_categories<R: Read>(source: R, path: &Path) -> Result<FxHashMap<i64, String>> {
    let mut reader = csv::Reader::from_reader(source);
    check_columns(&mut reader, path, &CATEGORY_COLUMNS)?;

    let mut map = FxHashMap::default();
    for row in reader.deserialize::<CategoryRecord>() {
        let record = row.map_err(|e| csv_error(path, e))?;
        let (Some(id), Some(name)) = (record.id, present(record.category_name)) else {
            continue;
        };
        if map.contains_key(&id) {
            tracing::warn!(id, name = %name, "Duplicate category id ignored");
            continue;
        }
        map.insert(id, name);
    }
    Ok(map)
}

/// Join, clean, deduplicate and truncate.
///
/// Pure pipeline over already-decoded records; the first record error aborts
/// the build.
pub fn build_catalog<I>(
    records: I,
    categories: &FxHashMap<i64, String>,
    max_rows: usize,
    policy: DuplicatePolicy,
) -> Result<(Catalog, LoadReport)>
where
    I: IntoIterator<Item = Result<ProductRecord>>,
{
    let mut report = LoadReport {
        categories: categories.len(),
        ..LoadReport::default()
    };
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    for record in records {
        if entries.len() >= max_rows {
            report.truncated = true;
            break;
        }
        let record = record?;
        report.products_read += 1;

        let Some(category) = record.category_id.and_then(|id| categories.get(&id)) else {
            report.unmatched += 1;
            continue;
        };
        let Some(entry) = project(record, category) else {
            report.incomplete += 1;
            continue;
        };

        if let Some(&first) = seen.get(&entry.asin) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateIdentifier {
                        asin: entry.asin,
                        first,
                        second: entries.len(),
                    });
                }
                DuplicatePolicy::KeepFirst => {
                    tracing::warn!(asin = %entry.asin, first, "Duplicate product identifier dropped");
                    report.duplicates += 1;
                    continue;
                }
            }
        }

        seen.insert(entry.asin.clone(), entries.len());
        entries.push(entry);
    }

    report.rows = entries.len();
    Ok((Catalog::new(entries), report))
}

/// Projects a joined row, or `None` if any projected value is missing.
fn project(record: ProductRecord, category: &str) -> Option<CatalogEntry> {
    let price = record.price.filter(|p| p.is_finite())?;
    Some(CatalogEntry {
        asin: present(record.asin)?,
        title: present(record.title)?,
        category: present(Some(category.to_string()))?,
        price,
        img_url: present(record.img_url)?,
    })
}

/// Filters out NA markers.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !NA_VALUES.contains(&v.as_str()))
}

fn check_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    path: &Path,
    required: &[&str],
) -> Result<()> {
    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    let columns: FxHashSet<&str> = headers.iter().collect();
    match required.iter().find(|c| !columns.contains(*c)) {
        Some(column) => Err(Error::MissingColumn {
            path: path.display().to_string(),
            column: (*column).to_string(),
        }),
        None => Ok(()),
    }
}

fn csv_error(path: &Path, source: csv::Error) -> Error {
    Error::Csv {
        path: path.display().to_string(),
        source,
    }
}
