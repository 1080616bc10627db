//! Process-wide catalog state.
//!
//! A [`CatalogSnapshot`] bundles the catalog table, the similarity index and
//! the identifier index, all built together from one load. The
//! [`CatalogStore`] holds the current snapshot behind an atomic pointer:
//! readers take one `Arc` per request and never see a half-built state,
//! rebuilds construct a fresh snapshot and swap it in whole.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::catalog::{Catalog, CatalogEntry, CatalogSource, LoadReport};
use crate::error::Result;
use crate::index::SimilarityIndex;
use crate::metrics::OperationalMetrics;

/// Immutable, versioned view of the catalog and its derived indexes.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: u64,
    built_at: SystemTime,
    catalog: Catalog,
    index: SimilarityIndex,
    ids: FxHashMap<String, usize>,
    report: LoadReport,
}

impl CatalogSnapshot {
    /// Builds the similarity and identifier indexes over `catalog`.
    ///
    /// If an identifier repeats, lookups resolve to its first row.
    #[must_use]
    pub fn build(catalog: Catalog, version: u64) -> Self {
        let index = SimilarityIndex::build(&catalog.titles());

        let mut ids = FxHashMap::default();
        for (row, entry) in catalog.iter().enumerate() {
            ids.entry(entry.asin.clone()).or_insert(row);
        }

        let report = LoadReport {
            rows: catalog.len(),
            ..LoadReport::default()
        };
        Self {
            version,
            built_at: SystemTime::now(),
            catalog,
            index,
            ids,
            report,
        }
    }

    /// Attaches the loader report.
    #[must_use]
    pub fn with_report(mut self, report: LoadReport) -> Self {
        self.report = report;
        self
    }

    /// Build counter, starting at 1 for the first successful build.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When the snapshot was built.
    #[must_use]
    pub fn built_at(&self) -> SystemTime {
        self.built_at
    }

    /// The catalog table.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The similarity index.
    #[must_use]
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Loader counters for this build.
    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns true if the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Row position of an identifier.
    #[must_use]
    pub fn row_of(&self, asin: &str) -> Option<usize> {
        self.ids.get(asin).copied()
    }

    /// Entry for an identifier.
    #[must_use]
    pub fn entry(&self, asin: &str) -> Option<&CatalogEntry> {
        self.row_of(asin).and_then(|row| self.catalog.get(row))
    }

    /// Returns true if the identifier is in the catalog.
    #[must_use]
    pub fn contains(&self, asin: &str) -> bool {
        self.ids.contains_key(asin)
    }
}

/// Atomically swappable holder of the current [`CatalogSnapshot`].
pub struct CatalogStore {
    source: CatalogSource,
    current: ArcSwapOption<CatalogSnapshot>,
    versions: AtomicU64,
    rebuild: Mutex<()>,
    metrics: Arc<OperationalMetrics>,
}

impl CatalogStore {
    /// Empty store that loads from `source`.
    #[must_use]
    pub fn new(source: CatalogSource) -> Self {
        Self::with_metrics(source, OperationalMetrics::shared())
    }

    /// Empty store reporting builds into `metrics`.
    #[must_use]
    pub fn with_metrics(source: CatalogSource, metrics: Arc<OperationalMetrics>) -> Self {
        Self {
            source,
            current: ArcSwapOption::empty(),
            versions: AtomicU64::new(0),
            rebuild: Mutex::new(()),
            metrics,
        }
    }

    /// Where catalogs are loaded from.
    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Shared operational counters.
    #[must_use]
    pub fn metrics(&self) -> &Arc<OperationalMetrics> {
        &self.metrics
    }

    /// The current snapshot, if one has been built.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current.load_full()
    }

    /// Returns true if a snapshot is installed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.current.load().is_some()
    }

    /// Loads the sources, builds a new snapshot and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns the loader error; the previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<CatalogSnapshot>> {
        let _guard = self.rebuild.lock();
        self.reload_locked()
    }

    /// The current snapshot, building one first if none exists.
    ///
    /// Concurrent callers wait for a single build. A failed build is logged
    /// and yields `None`.
    pub fn snapshot_or_reload(&self) -> Option<Arc<CatalogSnapshot>> {
        if let Some(snapshot) = self.snapshot() {
            return Some(snapshot);
        }

        let _guard = self.rebuild.lock();
        if let Some(snapshot) = self.snapshot() {
            return Some(snapshot);
        }
        tracing::info!("Catalog not loaded, building on demand");
        match self.reload_locked() {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::error!(error = %e, "On-demand catalog build failed");
                None
            }
        }
    }

    /// Installs an already-built catalog, bypassing the sources.
    pub fn install(&self, catalog: Catalog) -> Arc<CatalogSnapshot> {
        let _guard = self.rebuild.lock();
        let version = self.versions.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(CatalogSnapshot::build(catalog, version));
        self.swap_in(&snapshot);
        snapshot
    }

    fn reload_locked(&self) -> Result<Arc<CatalogSnapshot>> {
        let start = Instant::now();
        let (catalog, report) = match self.source.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                self.metrics.record_build_failure();
                return Err(e);
            }
        };

        let version = self.versions.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = Arc::new(CatalogSnapshot::build(catalog, version).with_report(report));
        self.swap_in(&snapshot);

        tracing::info!(
            version,
            products = snapshot.len(),
            vocabulary = snapshot.index().vocabulary_size(),
            elapsed_ms = start.elapsed().as_millis(),
            "Catalog snapshot installed"
        );
        Ok(snapshot)
    }

    fn swap_in(&self, snapshot: &Arc<CatalogSnapshot>) {
        self.current.store(Some(Arc::clone(snapshot)));
        self.metrics
            .record_build(snapshot.len() as u64, snapshot.version());
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("source", &self.source)
            .field("version", &self.snapshot().map(|s| s.version()))
            .finish_non_exhaustive()
    }
}
