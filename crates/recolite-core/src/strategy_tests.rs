//! Tests for the recommendation strategies.

use super::catalog::{Catalog, CatalogEntry};
use super::store::CatalogSnapshot;
use super::strategy::{category_strategy, similarity_strategy, Strategy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn product(asin: &str, title: &str, category: &str, price: f64) -> CatalogEntry {
    CatalogEntry {
        asin: asin.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        price,
        img_url: format!("https://img.example/{asin}.jpg"),
    }
}

fn fixture() -> CatalogSnapshot {
    CatalogSnapshot::build(
        Catalog::new(vec![
            product("A1", "wireless mouse", "Electronics", 9.99),
            product("A2", "wireless keyboard", "Electronics", 19.99),
            product("A3", "garden hose", "Garden", 5.00),
        ]),
        1,
    )
}

fn asins(snapshot: &CatalogSnapshot, rows: &[usize]) -> Vec<String> {
    rows.iter()
        .map(|&r| snapshot.catalog().get(r).unwrap().asin.clone())
        .collect()
}

#[test]
fn test_category_strategy_returns_same_category_peer() {
    let snapshot = fixture();
    let mut rng = StdRng::seed_from_u64(7);
    let rows = category_strategy(&snapshot, "A1", 5, &mut rng);
    assert_eq!(asins(&snapshot, &rows), vec!["A2"]);
}

#[test]
fn test_category_strategy_no_peers() {
    let snapshot = fixture();
    let mut rng = StdRng::seed_from_u64(7);
    assert!(category_strategy(&snapshot, "A3", 5, &mut rng).is_empty());
}

#[test]
fn test_similarity_strategy_ranks_shared_terms_first() {
    let snapshot = fixture();
    let rows = similarity_strategy(&snapshot, "A1", 5);
    // no score floor: the unrelated row trails with score 0
    assert_eq!(asins(&snapshot, &rows), vec!["A2", "A3"]);
    let rows = similarity_strategy(&snapshot, "A1", 1);
    assert_eq!(asins(&snapshot, &rows), vec!["A2"]);
}

#[test]
fn test_unknown_identifier_is_empty_for_both() {
    let snapshot = fixture();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(category_strategy(&snapshot, "ZZZ", 5, &mut rng).is_empty());
    assert!(similarity_strategy(&snapshot, "ZZZ", 5).is_empty());
    for strategy in Strategy::ALL {
        assert!(strategy.recommend(&snapshot, "ZZZ", 5, &mut rng).is_empty());
    }
}

#[test]
fn test_category_sample_size_and_no_repeats() {
    let entries: Vec<CatalogEntry> = (0..20)
        .map(|i| product(&format!("P{i}"), &format!("gadget {i}"), "Electronics", 1.0))
        .collect();
    let snapshot = CatalogSnapshot::build(Catalog::new(entries), 1);
    let mut rng = StdRng::seed_from_u64(99);

    let mut rows = category_strategy(&snapshot, "P3", 5, &mut rng);
    assert_eq!(rows.len(), 5);
    assert!(!rows.contains(&3));
    rows.sort_unstable();
    rows.dedup();
    assert_eq!(rows.len(), 5);
}

#[test]
fn test_category_sampling_is_reproducible_with_seed() {
    let entries: Vec<CatalogEntry> = (0..30)
        .map(|i| product(&format!("P{i}"), "thing", "Toys", 1.0))
        .collect();
    let snapshot = CatalogSnapshot::build(Catalog::new(entries), 1);

    let a = category_strategy(&snapshot, "P0", 4, &mut StdRng::seed_from_u64(5));
    let b = category_strategy(&snapshot, "P0", 4, &mut StdRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn test_choose_picks_both_strategies() {
    let mut rng = StdRng::seed_from_u64(2024);
    let picks: Vec<Strategy> = (0..200).map(|_| Strategy::choose(&mut rng)).collect();
    let category = picks.iter().filter(|s| **s == Strategy::CategoryBased).count();
    assert!(category > 50 && category < 150, "category picked {category} times");
}

#[test]
fn test_labels() {
    assert_eq!(Strategy::CategoryBased.label(), "Category Based");
    assert_eq!(Strategy::NameSimilarity.to_string(), "Name Similarity");
}
