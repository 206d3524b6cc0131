mod common;

use common::{listing_page, setup, StaticFetcher};
use landedcost::config::AppConfig;
use landedcost::domain::error::DomainError;
use landedcost::domain::ports::page_cache::PageCache;
use landedcost::infrastructure::sqlite::page_cache::SqlitePageCache;
use landedcost::LandedCost;

fn file_config(dir: &tempfile::TempDir) -> AppConfig {
    AppConfig {
        cache_db: dir.path().join("pages.db").to_string_lossy().into_owned(),
        ..AppConfig::default()
    }
}

#[test]
fn test_cache_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);
    let ttl = chrono::Duration::hours(1);

    {
        let cache = SqlitePageCache::open(&config.cache_db, ttl).unwrap();
        cache.put("https://www.amazon.com/dp/B01", b"<html></html>").unwrap();
    }

    let reopened = SqlitePageCache::open(&config.cache_db, ttl).unwrap();
    assert_eq!(
        reopened.get("https://www.amazon.com/dp/B01").unwrap().as_deref(),
        Some(&b"<html></html>"[..])
    );
}

#[test]
fn test_purge_and_clear_through_facade() {
    let dir = tempfile::tempdir().unwrap();
    let config = file_config(&dir);
    let lc = LandedCost::new(&config).unwrap();

    let cache = SqlitePageCache::open(&config.cache_db, chrono::Duration::hours(1)).unwrap();
    cache
        .put_at("stale", b"a", chrono::Utc::now() - chrono::Duration::hours(3))
        .unwrap();
    cache.put("fresh", b"b").unwrap();

    assert_eq!(lc.purge_cache().unwrap(), 1);
    assert_eq!(lc.clear_cache().unwrap(), 1);
    assert_eq!(lc.clear_cache().unwrap(), 0);
}

#[test]
fn test_cache_commands_need_a_cache() {
    let (lc, _) = setup(StaticFetcher::new());
    assert!(matches!(lc.purge_cache(), Err(DomainError::Config(_))));
    assert!(matches!(lc.clear_cache(), Err(DomainError::Config(_))));
}

#[test]
fn test_quote_without_observed_price() {
    let listing = landedcost::quote(
        &AppConfig::default(),
        20.0,
        Some("2 pounds".into()),
        None,
        None,
    )
    .unwrap();
    assert_eq!(listing.recommended_price, Some(5209));
    assert_eq!(listing.record().get("DestinationPrice"), Some("unavailable"));
}

#[test]
fn test_quote_with_observed_price_and_dimensions() {
    let listing = landedcost::quote(
        &AppConfig::default(),
        20.0,
        Some("2 pounds".into()),
        Some("3 x 3 x 3 inches".into()),
        Some(4500.0),
    )
    .unwrap();
    // 27 / 139 lb stays below the declared 2 lb.
    assert_eq!(listing.effective_weight_lbs(), 2.0);
    assert_eq!(listing.recommended_price, Some(4379));
}

#[test]
fn test_quote_rejects_non_positive_price() {
    for price in [0.0, -5.0, f64::NAN] {
        assert!(matches!(
            landedcost::quote(&AppConfig::default(), price, None, None, None),
            Err(DomainError::InvalidInput(_))
        ));
    }
}

#[test]
fn test_extract_saved_page() {
    let html = listing_page(
        Some("$20.00"),
        &[("Item Weight", "2 pounds"), ("Product Dimensions", "9 x 6 x 3 inches")],
    );
    let facts = landedcost::extract(html.as_bytes());
    assert_eq!(facts.price_text.as_deref(), Some("$20.00"));
    assert_eq!(facts.weight_text.as_deref(), Some("2 pounds"));
    assert_eq!(facts.dimensions_text.as_deref(), Some("9 x 6 x 3 inches"));
}

#[test]
fn test_quote_with_oversized_weight_is_unavailable() {
    let listing = landedcost::quote(
        &AppConfig::default(),
        20.0,
        Some("99999999999999999999 pounds".into()),
        None,
        None,
    )
    .unwrap();
    assert!(listing.recommended_price.is_none());
    assert_eq!(listing.record().get("RecommendedPrice"), Some("unavailable"));
}
