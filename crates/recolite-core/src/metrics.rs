//! Operational metrics for monitoring Recolite in production.
//!
//! Thread-safe counters and gauges for search traffic, strategy picks and
//! catalog builds, exportable in Prometheus text format.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::strategy::Strategy;

/// Operational metrics.
#[derive(Debug, Default)]
pub struct OperationalMetrics {
    /// Search requests with a non-blank query
    pub searches_total: AtomicU64,
    /// Searches that returned no results
    pub empty_results: AtomicU64,
    /// Recommendations served by the category strategy
    pub category_strategy: AtomicU64,
    /// Recommendations served by the similarity strategy
    pub similarity_strategy: AtomicU64,
    /// Successful catalog builds
    pub catalog_builds: AtomicU64,
    /// Failed catalog builds
    pub catalog_build_failures: AtomicU64,
    /// Products in the current catalog
    pub catalog_products: AtomicU64,
    /// Version of the current catalog snapshot
    pub catalog_version: AtomicU64,
}

impl OperationalMetrics {
    /// Creates a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shared metrics instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Records a search and whether it produced any result.
    pub fn record_search(&self, found: bool) {
        self.searches_total.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.empty_results.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records which strategy served a recommendation request.
    pub fn record_strategy(&self, strategy: Strategy) {
        let counter = match strategy {
            Strategy::CategoryBased => &self.category_strategy,
            Strategy::NameSimilarity => &self.similarity_strategy,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a successful catalog build.
    pub fn record_build(&self, products: u64, version: u64) {
        self.catalog_builds.fetch_add(1, Ordering::Relaxed);
        self.catalog_products.store(products, Ordering::Relaxed);
        self.catalog_version.store(version, Ordering::Relaxed);
    }

    /// Records a failed catalog build.
    pub fn record_build_failure(&self) {
        self.catalog_build_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Renders all metrics in Prometheus exposition format.
    #[must_use]
    pub fn export_prometheus(&self) -> String {
        let mut output = String::new();
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);

        let counters = [
            ("recolite_searches_total", "Search requests with a non-blank query", load(&self.searches_total)),
            ("recolite_empty_results_total", "Searches that returned no results", load(&self.empty_results)),
            ("recolite_catalog_builds_total", "Successful catalog builds", load(&self.catalog_builds)),
            ("recolite_catalog_build_failures_total", "Failed catalog builds", load(&self.catalog_build_failures)),
        ];
        for (name, help, value) in counters {
            // Reason: writing to a String cannot fail
            let _ = writeln!(output, "# HELP {name} {help}");
            let _ = writeln!(output, "# TYPE {name} counter");
            let _ = writeln!(output, "{name} {value}\n");
        }

        let _ = writeln!(
            output,
            "# HELP recolite_recommendations_total Recommendation requests by strategy"
        );
        let _ = writeln!(output, "# TYPE recolite_recommendations_total counter");
        let _ = writeln!(
            output,
            "recolite_recommendations_total{{strategy=\"category\"}} {}",
            load(&self.category_strategy)
        );
        let _ = writeln!(
            output,
            "recolite_recommendations_total{{strategy=\"similarity\"}} {}\n",
            load(&self.similarity_strategy)
        );

        let gauges = [
            ("recolite_catalog_products", "Products in the current catalog", load(&self.catalog_products)),
            ("recolite_catalog_version", "Version of the current catalog snapshot", load(&self.catalog_version)),
        ];
        for (name, help, value) in gauges {
            let _ = writeln!(output, "# HELP {name} {help}");
            let _ = writeln!(output, "# TYPE {name} gauge");
            let _ = writeln!(output, "{name} {value}\n");
        }

        output
    }
}
