use crate::domain::entities::priced_listing::PricedListing;
use crate::domain::error::DomainError;

/// Caller-owned sink for finished pipeline runs.
///
/// Appends are whole records; implementations serialize concurrent appends.
pub trait ListingStore: Send + Sync {
    fn append(&self, listing: PricedListing) -> Result<(), DomainError>;
    fn snapshot(&self) -> Result<Vec<PricedListing>, DomainError>;
}
