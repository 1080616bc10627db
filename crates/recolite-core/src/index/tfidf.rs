//! TF-IDF vectorizer.
//!
//! ```text
//! tf(t, d)  = raw count of t in d
//! idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d)   = tf(t, d) * idf(t), then L2-normalized per document
//! ```
//!
//! Vocabulary dimensions are assigned in lexicographic term order so two
//! fits over the same corpus produce identical vectors.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::sparse::SparseVector;
use crate::text::tokenize;

/// Fitted vocabulary and IDF weights.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: FxHashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fits on `documents` and returns the vectorizer with one vector per document.
    #[must_use]
    pub fn fit_transform(documents: &[&str]) -> (Self, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut unique: Vec<&str> = tokens.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Reason: corpus size is capped far below f64's exact integer range
        #[allow(clippy::cast_precision_loss)]
        let n = documents.len() as f64;
        let mut vocabulary = FxHashMap::default();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (dim, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), dim);
            #[allow(clippy::cast_precision_loss)]
            let df = df as f64;
            // Reason: idf lies in [1, ln(n + 1) + 1], well inside f32 range
            #[allow(clippy::cast_possible_truncation)]
            idf.push((((1.0 + n) / (1.0 + df)).ln() + 1.0) as f32);
        }

        let vectorizer = Self { vocabulary, idf };
        let vectors = tokenized
            .iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();
        (vectorizer, vectors)
    }

    /// Projects text into the fitted space. Unknown terms are ignored.
    #[must_use]
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text))
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let pairs = tokens
            .iter()
            .filter_map(|t| self.vocabulary.get(t.as_str()))
            .map(|&dim| (dim, self.idf[dim]))
            .collect();
        // from_pairs sums repeated dimensions: count * idf
        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        vector
    }

    /// Number of terms in the vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Dimension of a term, if known.
    #[must_use]
    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if known.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.dimension(term).map(|dim| self.idf[dim])
    }
}
