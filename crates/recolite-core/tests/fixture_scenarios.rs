//! End-to-end scenarios over CSV fixtures written to a temp directory.

use rand::rngs::StdRng;
use rand::SeedableRng;
use recolite_core::{
    category_strategy, similarity_strategy, CatalogSnapshot, CatalogSource, CatalogStore,
    DataConfig, QueryOptions, QueryService,
};
use tempfile::TempDir;

const PRODUCTS: &str = "\
asin,title,imgUrl,productURL,stars,reviews,price,listPrice,category_id,isBestSeller,boughtInLastMonth
A1,wireless mouse,u1,https://example.com/A1,4.5,10,9.99,0,1,False,0
A2,wireless keyboard,u2,https://example.com/A2,4.1,3,19.99,0,1,False,0
A3,garden hose,u3,https://example.com/A3,3.8,7,5.00,0,2,True,50
";

const CATEGORIES: &str = "id,category_name\n1,Electronics\n2,Garden\n";

fn fixture_store() -> (TempDir, CatalogStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("amazon_sample_products.csv"), PRODUCTS).unwrap();
    std::fs::write(dir.path().join("amazon_sample_category.csv"), CATEGORIES).unwrap();
    let config = DataConfig {
        dir: dir.path().to_path_buf(),
        ..DataConfig::default()
    };
    let store = CatalogStore::new(CatalogSource::from_config(&config));
    (dir, store)
}

fn asins(snapshot: &CatalogSnapshot, rows: &[usize]) -> Vec<String> {
    rows.iter()
        .map(|&r| snapshot.catalog().get(r).unwrap().asin.clone())
        .collect()
}

#[test]
fn test_wireless_query_matches_a_wireless_product() {
    let (_dir, store) = fixture_store();
    let snapshot = store.reload().unwrap();
    let service = QueryService::new(&snapshot, QueryOptions::default());

    let best = service.best_match("wireless").unwrap();
    assert!(best == "A1" || best == "A2");
    assert!(snapshot.contains(best));
}

#[test]
fn test_similarity_strategy_for_a1() {
    let (_dir, store) = fixture_store();
    let snapshot = store.reload().unwrap();

    let rows = similarity_strategy(&snapshot, "A1", 5);
    let ids = asins(&snapshot, &rows);
    assert_eq!(ids.first().map(String::as_str), Some("A2"));
    assert!(!ids.contains(&"A1".to_string()));
}

#[test]
fn test_category_strategy_scenarios() {
    let (_dir, store) = fixture_store();
    let snapshot = store.reload().unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let rows = category_strategy(&snapshot, "A1", 5, &mut rng);
    assert_eq!(asins(&snapshot, &rows), vec!["A2"]);
    assert!(category_strategy(&snapshot, "A3", 5, &mut rng).is_empty());
}

#[test]
fn test_blank_query_yields_nothing() {
    let (_dir, store) = fixture_store();
    let snapshot = store.reload().unwrap();
    let service = QueryService::new(&snapshot, QueryOptions::default());
    assert!(service.best_match("").is_none());
    assert!(service
        .search("", &mut StdRng::seed_from_u64(1))
        .is_none());
}

#[test]
fn test_recommendations_carry_two_decimal_prices() {
    let (_dir, store) = fixture_store();
    let snapshot = store.reload().unwrap();
    let service = QueryService::new(&snapshot, QueryOptions::default());
    let outcome = service
        .search("garden hose", &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(outcome.matched.asin, "A3");
    assert_eq!(outcome.matched.price_display(), "5.00");
}

#[test]
fn test_reload_twice_same_identifiers() {
    let (_dir, store) = fixture_store();
    let a = store.reload().unwrap();
    let b = store.reload().unwrap();
    let ids = |s: &CatalogSnapshot| -> Vec<String> {
        s.catalog().iter().map(|e| e.asin.clone()).collect()
    };
    assert_eq!(a.len(), b.len());
    assert_eq!(ids(a.as_ref()), ids(b.as_ref()));
    assert!(b.version() > a.version());
}
