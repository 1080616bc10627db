//! Title similarity index.
//!
//! One L2-normalized TF-IDF row per catalog entry, aligned by position with
//! the catalog table. Because rows are unit length, cosine similarity is a
//! sparse dot product. Scoring walks per-term postings lists so only rows
//! sharing a term with the query are touched; every other row scores `0.0`.
//!
//! # Example
//!
//! ```
//! use recolite_core::index::SimilarityIndex;
//!
//! let index = SimilarityIndex::build(&["wireless mouse", "wireless keyboard", "garden hose"]);
//! let query = index.query_vector("wireless");
//! let hits = index.nearest(&query, None, 2);
//!
//! assert_eq!(hits.len(), 2);
//! assert!(hits.iter().all(|n| n.row < 2));
//! ```

pub mod sparse;
pub mod tfidf;


use std::cmp::Ordering;

pub use sparse::SparseVector;
pub use tfidf::TfidfVectorizer;

/// A scored index row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row position in the catalog.
    pub row: usize,
    /// Cosine similarity to the query.
    pub score: f32,
}

/// Score descending, then row ascending.
fn rank(a: &Neighbor, b: &Neighbor) -> Ordering {
    b.score.total_cmp(&a.score).then(a.row.cmp(&b.row))
}

/// Read-only TF-IDF index over catalog titles.
#[derive(Debug, Clone, Default)]
pub struct SimilarityIndex {
    vectorizer: TfidfVectorizer,
    rows: Vec<SparseVector>,
    /// `postings[dim]` lists `(row, weight)` for every row containing `dim`.
    postings: Vec<Vec<(usize, f32)>>,
}

impl SimilarityIndex {
    /// Fits the vectorizer on `titles` and stores one row per title.
    #[must_use]
    pub fn build(titles: &[&str]) -> Self {
        let (vectorizer, rows) = TfidfVectorizer::fit_transform(titles);

        let mut postings = vec![Vec::new(); vectorizer.vocabulary_size()];
        for (row, vector) in rows.iter().enumerate() {
            for &(dim, weight) in vector.entries() {
                postings[dim].push((row, weight));
            }
        }

        Self {
            vectorizer,
            rows,
            postings,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the index has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// The fitted vectorizer.
    #[must_use]
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Projects arbitrary text into the index space.
    #[must_use]
    pub fn query_vector(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Stored vector of a row.
    #[must_use]
    pub fn row_vector(&self, row: usize) -> Option<&SparseVector> {
        self.rows.get(row)
    }

    /// Cosine similarity between `vector` and one row.
    #[must_use]
    pub fn score(&self, vector: &SparseVector, row: usize) -> f32 {
        self.rows.get(row).map_or(0.0, |r| r.dot(vector))
    }

    /// Cosine similarity between `vector` and every row.
    #[must_use]
    pub fn scores(&self, vector: &SparseVector) -> Vec<f32> {
        let mut scores = vec![0.0f32; self.rows.len()];
        for &(dim, q) in vector.entries() {
            if let Some(list) = self.postings.get(dim) {
                for &(row, w) in list {
                    scores[row] += q * w;
                }
            }
        }
        scores
    }

    /// The `k` rows most similar to `vector`, best first.
    ///
    /// `exclude` removes one row from consideration. Ties keep row order.
    /// No threshold is applied: zero-score rows fill the result when fewer
    /// than `k` rows overlap the query.
    #[must_use]
    pub fn nearest(&self, vector: &SparseVector, exclude: Option<usize>, k: usize) -> Vec<Neighbor> {
        if k == 0 || self.rows.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Neighbor> = self
            .scores(vector)
            .into_iter()
            .enumerate()
            .filter(|&(row, _)| Some(row) != exclude)
            .map(|(row, score)| Neighbor { row, score })
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k - 1, rank);
            candidates.truncate(k);
        }
        candidates.sort_by(rank);
        candidates
    }

    /// The single best row for `vector`.
    #[must_use]
    pub fn best(&self, vector: &SparseVector) -> Option<Neighbor> {
        self.nearest(vector, None, 1).into_iter().next()
    }
}
