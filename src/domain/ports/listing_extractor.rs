use crate::domain::entities::listing_facts::ListingFacts;

/// Turns a listing page into [`ListingFacts`].
///
/// Must never fail: malformed or unexpected markup degrades individual
/// fields to `None`.
pub trait ListingExtractor: Send + Sync {
    fn extract(&self, html: &[u8]) -> ListingFacts;
}
