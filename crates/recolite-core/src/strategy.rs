//! Recommendation strategies.
//!
//! Two interchangeable policies produce up to `k` related rows for a source
//! product. Each request picks one uniformly at random, so repeated requests
//! for the same product can differ. Randomness is passed in as a [`Rng`] so
//! callers decide between a seeded and an entropy-backed source.

use std::fmt;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::store::CatalogSnapshot;

/// A recommendation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Random sample of products from the same category.
    #[serde(rename = "Category Based")]
    CategoryBased,
    /// Nearest neighbors by title similarity.
    #[serde(rename = "Name Similarity")]
    NameSimilarity,
}

impl Strategy {
    /// Both strategies.
    pub const ALL: [Strategy; 2] = [Strategy::CategoryBased, Strategy::NameSimilarity];

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CategoryBased => "Category Based",
            Self::NameSimilarity => "Name Similarity",
        }
    }

    /// Picks a strategy with equal probability.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::CategoryBased
        } else {
            Self::NameSimilarity
        }
    }

    /// Runs this strategy for `asin`.
    pub fn recommend<R: Rng + ?Sized>(
        self,
        snapshot: &CatalogSnapshot,
        asin: &str,
        k: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        match self {
            Self::CategoryBased => category_strategy(snapshot, asin, k, rng),
            Self::NameSimilarity => similarity_strategy(snapshot, asin, k),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Random sample of up to `k` other rows sharing the source's category.
///
/// Empty if `asin` is unknown or has no category peers. The sample is drawn
/// without replacement and in no particular order.
pub fn category_strategy<R: Rng + ?Sized>(
    snapshot: &CatalogSnapshot,
    asin: &str,
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let Some(source) = snapshot.row_of(asin) else {
        return Vec::new();
    };
    let catalog = snapshot.catalog();
    let Some(entry) = catalog.get(source) else {
        return Vec::new();
    };

    let peers: Vec<usize> = catalog
        .rows_in_category(&entry.category)
        .filter(|&row| row != source)
        .collect();
    if peers.is_empty() || k == 0 {
        return Vec::new();
    }

    let amount = k.min(peers.len());
    index::sample(rng, peers.len(), amount)
        .into_iter()
        .map(|i| peers[i])
        .collect()
}

/// The `k` rows with the most similar titles, best first, excluding the source.
///
/// Empty if `asin` is unknown.
pub fn similarity_strategy(snapshot: &CatalogSnapshot, asin: &str, k: usize) -> Vec<usize> {
    let Some(source) = snapshot.row_of(asin) else {
        return Vec::new();
    };
    let index = snapshot.index();
    let Some(vector) = index.row_vector(source) else {
        return Vec::new();
    };
    index
        .nearest(vector, Some(source), k)
        .into_iter()
        .map(|n| n.row)
        .collect()
}
