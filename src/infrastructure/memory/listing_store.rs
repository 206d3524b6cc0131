use crate::domain::entities::priced_listing::PricedListing;
use crate::domain::error::DomainError;
use crate::domain::ports::listing_store::ListingStore;
use std::sync::Mutex;

/// Result store held in memory for the lifetime of one CLI invocation.
#[derive(Default)]
pub struct InMemoryListingStore {
    listings: Mutex<Vec<PricedListing>>,
}

impl InMemoryListingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListingStore for InMemoryListingStore {
    fn append(&self, listing: PricedListing) -> Result<(), DomainError> {
        self.listings
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?
            .push(listing);
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<PricedListing>, DomainError> {
        Ok(self
            .listings
            .lock()
            .map_err(|e| DomainError::Store(e.to_string()))?
            .clone())
    }
}
