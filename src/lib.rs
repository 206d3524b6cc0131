pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::batch::{BatchPricingUseCase, BatchReport};
use crate::application::price_listing::{price_facts, PriceListingUseCase};
use crate::config::AppConfig;
use crate::domain::entities::listing_facts::ListingFacts;
use crate::domain::entities::priced_listing::PricedListing;
use crate::domain::error::DomainError;
use crate::domain::ports::listing_extractor::ListingExtractor;
use crate::domain::ports::listing_store::ListingStore;
use crate::domain::ports::page_cache::PageCache;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::infrastructure::html::listing_extractor::HtmlListingExtractor;
use crate::infrastructure::http::page_fetcher::HttpPageFetcher;
use crate::infrastructure::sqlite::page_cache::SqlitePageCache;
use std::sync::Arc;

pub struct LandedCost {
    pricer: Arc<PriceListingUseCase>,
    batch_uc: BatchPricingUseCase,
    cache: Option<Arc<dyn PageCache>>,
}

impl LandedCost {
    /// Wires the HTTP fetcher over the SQLite page cache named in `config`.
    pub fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let ttl = chrono::Duration::from_std(config.cache_ttl)
            .map_err(|e| DomainError::Config(format!("Invalid cache TTL: {e}")))?;
        let cache: Arc<dyn PageCache> = Arc::new(SqlitePageCache::open(&config.cache_db, ttl)?);
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpPageFetcher::new(
            config.fetcher.clone(),
            Some(cache.clone()),
        )?);

        let mut lc = Self::with_fetcher(fetcher, config);
        lc.cache = Some(cache);
        Ok(lc)
    }

    /// Uses the given fetcher and no page cache.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, config: &AppConfig) -> Self {
        let extractor: Arc<dyn ListingExtractor> = Arc::new(HtmlListingExtractor::new());
        let pricer = Arc::new(PriceListingUseCase::new(
            fetcher,
            extractor,
            config.markets.clone(),
            config.cost_model.clone(),
        ));

        Self {
            batch_uc: BatchPricingUseCase::new(pricer.clone()),
            pricer,
            cache: None,
        }
    }

    pub async fn price(&self, identifier: &str) -> PricedListing {
        self.pricer.execute(identifier).await
    }

    pub async fn price_batch(&self, identifiers: &[String], store: &dyn ListingStore) -> BatchReport {
        self.batch_uc.execute(identifiers, store).await
    }

    pub fn purge_cache(&self) -> Result<usize, DomainError> {
        self.page_cache()?.purge_expired()
    }

    pub fn clear_cache(&self) -> Result<usize, DomainError> {
        self.page_cache()?.clear()
    }

    fn page_cache(&self) -> Result<&Arc<dyn PageCache>, DomainError> {
        self.cache
            .as_ref()
            .ok_or_else(|| DomainError::Config("No page cache configured".into()))
    }
}

/// Prices a listing from values typed in by hand, without fetching anything.
pub fn quote(
    config: &AppConfig,
    source_price: f64,
    weight_text: Option<String>,
    dimensions_text: Option<String>,
    observed_price: Option<f64>,
) -> Result<PricedListing, DomainError> {
    if !source_price.is_finite() || source_price <= 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "Source price must be positive, got {source_price}"
        )));
    }
    let source = ListingFacts {
        price_text: Some(source_price.to_string()),
        weight_text,
        dimensions_text,
    };
    let destination = ListingFacts {
        price_text: observed_price.map(|p| p.to_string()),
        ..Default::default()
    };
    Ok(price_facts(
        "quote",
        &config.markets,
        &config.cost_model,
        Some(&source),
        Some(&destination),
    ))
}

/// Runs the listing extractor over a saved page.
pub fn extract(html: &[u8]) -> ListingFacts {
    HtmlListingExtractor::new().extract(html)
}
