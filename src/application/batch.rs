use crate::application::price_listing::PriceListingUseCase;
use crate::domain::ports::listing_store::ListingStore;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub struct BatchPricingUseCase {
    pricer: Arc<PriceListingUseCase>,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    /// Listings that got a recommended price.
    pub priced: usize,
    /// Listings without a recommendation (no usable source price, or a
    /// tier value too large to round).
    pub unpriced: usize,
    pub errors: Vec<String>,
}

impl BatchPricingUseCase {
    pub fn new(pricer: Arc<PriceListingUseCase>) -> Self {
        Self { pricer }
    }

    /// Prices each identifier in order and appends one record per run to
    /// `store`. Blank identifiers are skipped; a failed identifier still
    /// yields an all-unavailable record and never stops the batch.
    pub async fn execute(&self, identifiers: &[String], store: &dyn ListingStore) -> BatchReport {
        let mut report = BatchReport::default();

        for identifier in identifiers.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let listing = self.pricer.execute(identifier).await;
            report.processed += 1;
            if listing.recommended_price.is_some() {
                report.priced += 1;
            } else {
                report.unpriced += 1;
            }

            if let Err(e) = store.append(listing) {
                warn!(identifier, error = %e, "failed to store listing");
                report
                    .errors
                    .push(format!("Failed to store {identifier}: {e}"));
            }
        }

        report
    }
}
