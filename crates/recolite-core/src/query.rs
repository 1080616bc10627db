//! Query service: best match, recommendations and trending samples.
//!
//! A [`QueryService`] borrows one [`CatalogSnapshot`] for the duration of a
//! request, so every lookup in that request sees the same catalog.

use rand::seq::index;
use rand::Rng;

use crate::catalog::CatalogEntry;
use crate::config::RecommendConfig;
use crate::index::Neighbor;
use crate::store::CatalogSnapshot;
use crate::strategy::Strategy;

/// Per-request tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOptions {
    /// Number of recommendations.
    pub k: usize,
    /// Minimum score for a best match; `0.0` accepts anything.
    pub min_score: f32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            k: 5,
            min_score: 0.0,
        }
    }
}

impl From<&RecommendConfig> for QueryOptions {
    fn from(config: &RecommendConfig) -> Self {
        Self {
            k: config.k,
            min_score: config.min_score,
        }
    }
}

/// Recommendations for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    /// Strategy that produced the list.
    pub strategy: Strategy,
    /// Recommended entries, in strategy order.
    pub entries: Vec<&'a CatalogEntry>,
}

/// Result of a free-text search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<'a> {
    /// Best matching entry.
    pub matched: &'a CatalogEntry,
    /// Similarity of the match to the query.
    pub score: f32,
    /// Strategy used for the recommendations.
    pub strategy: Strategy,
    /// Related entries.
    pub recommendations: Vec<&'a CatalogEntry>,
}

impl<'a> SearchOutcome<'a> {
    /// The match followed by its recommendations.
    #[must_use]
    pub fn results(&self) -> Vec<&'a CatalogEntry> {
        std::iter::once(self.matched)
            .chain(self.recommendations.iter().copied())
            .collect()
    }
}

/// Read-only query operations over one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    snapshot: &'a CatalogSnapshot,
    options: QueryOptions,
}

impl<'a> QueryService<'a> {
    /// Service over `snapshot`.
    #[must_use]
    pub fn new(snapshot: &'a CatalogSnapshot, options: QueryOptions) -> Self {
        Self { snapshot, options }
    }

    /// The snapshot being queried.
    #[must_use]
    pub fn snapshot(&self) -> &'a CatalogSnapshot {
        self.snapshot
    }

    /// Highest-scoring row for `text`.
    ///
    /// `None` for blank text, an empty catalog, or a best score under the
    /// configured floor.
    #[must_use]
    pub fn best_match_row(&self, text: &str) -> Option<Neighbor> {
        if text.trim().is_empty() {
            return None;
        }
        let index = self.snapshot.index();
        let best = index.best(&index.query_vector(text))?;
        if best.score < self.options.min_score {
            tracing::debug!(score = best.score, floor = self.options.min_score, "Best match under floor");
            return None;
        }
        Some(best)
    }

    /// Identifier of the best match for `text`.
    #[must_use]
    pub fn best_match(&self, text: &str) -> Option<&'a str> {
        let row = self.best_match_row(text)?.row;
        self.snapshot.catalog().get(row).map(|e| e.asin.as_str())
    }

    /// Recommendations for `asin` using a randomly chosen strategy.
    ///
    /// `None` if the identifier is unknown.
    pub fn recommend<R: Rng + ?Sized>(&self, asin: &str, rng: &mut R) -> Option<Recommendation<'a>> {
        let strategy = Strategy::choose(rng);
        self.recommend_with(strategy, asin, rng)
    }

    /// Recommendations for `asin` using `strategy`.
    pub fn recommend_with<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        asin: &str,
        rng: &mut R,
    ) -> Option<Recommendation<'a>> {
        if !self.snapshot.contains(asin) {
            return None;
        }
        let catalog = self.snapshot.catalog();
        let entries = strategy
            .recommend(self.snapshot, asin, self.options.k, rng)
            .into_iter()
            .filter_map(|row| catalog.get(row))
            .collect();
        Some(Recommendation { strategy, entries })
    }

    /// Best match for `text` plus its recommendations.
    pub fn search<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Option<SearchOutcome<'a>> {
        let best = self.best_match_row(text)?;
        let matched = self.snapshot.catalog().get(best.row)?;
        let recommendation = self.recommend(&matched.asin, rng)?;
        tracing::debug!(
            query = text,
            asin = %matched.asin,
            score = best.score,
            strategy = %recommendation.strategy,
            recommendations = recommendation.entries.len(),
            "Search resolved"
        );
        Some(SearchOutcome {
            matched,
            score: best.score,
            strategy: recommendation.strategy,
            recommendations: recommendation.entries,
        })
    }

    /// Random sample of up to `n` entries, without replacement.
    pub fn trending<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<&'a CatalogEntry> {
        let entries = self.snapshot.catalog().entries();
        let amount = n.min(entries.len());
        index::sample(rng, entries.len(), amount)
            .into_iter()
            .map(|i| &entries[i])
            .collect()
    }
}
