//! Fuzz target for index construction and lookup.
//!
//! Builds an index from arbitrary titles and queries it with arbitrary text.
//! Results must be bounded by `k`, never contain the excluded row, and
//! carry finite scores in `[0, 1]` (with float slack).
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_similarity_index
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use recolite_core::SimilarityIndex;

#[derive(Debug, Arbitrary)]
struct Input {
    titles: Vec<String>,
    query: String,
    exclude: u8,
    k: u8,
}

fuzz_target!(|input: Input| {
    if input.titles.len() > 256 {
        return;
    }
    let refs: Vec<&str> = input.titles.iter().map(String::as_str).collect();
    let index = SimilarityIndex::build(&refs);
    assert_eq!(index.len(), refs.len());

    let exclude = usize::from(input.exclude);
    let k = usize::from(input.k);
    let hits = index.nearest(&index.query_vector(&input.query), Some(exclude), k);

    assert!(hits.len() <= k);
    for hit in hits {
        assert_ne!(hit.row, exclude);
        assert!(hit.score.is_finite());
        assert!((-1e-4..=1.0 + 1e-4).contains(&hit.score));
    }
});
