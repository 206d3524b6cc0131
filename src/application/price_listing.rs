use crate::domain::entities::listing_facts::ListingFacts;
use crate::domain::entities::priced_listing::PricedListing;
use crate::domain::ports::listing_extractor::ListingExtractor;
use crate::domain::ports::page_fetcher::PageFetcher;
use crate::domain::values::cost_model::CostModel;
use crate::domain::values::market::{Market, MarketPair};
use crate::domain::values::profit_tiers::{compute_tiers, recommend_price};
use crate::domain::values::weight::{effective_weight, normalize_dimensions, normalize_weight};
use std::sync::Arc;
use tracing::{info, warn};

/// Prices one identifier end to end: fetch both markets, extract, normalize,
/// compute tiers and the recommendation.
pub struct PriceListingUseCase {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn ListingExtractor>,
    markets: MarketPair,
    cost_model: CostModel,
}

impl PriceListingUseCase {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn ListingExtractor>,
        markets: MarketPair,
        cost_model: CostModel,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            markets,
            cost_model,
        }
    }

    /// Always returns a listing; anything that could not be fetched or
    /// parsed shows up as an absent field.
    pub async fn execute(&self, identifier: &str) -> PricedListing {
        let identifier = identifier.trim();
        let source = self.facts_from(&self.markets.source, identifier).await;
        let destination = self.facts_from(&self.markets.destination, identifier).await;

        let listing = price_facts(
            identifier,
            &self.markets,
            &self.cost_model,
            source.as_ref(),
            destination.as_ref(),
        );
        info!(
            identifier,
            source_price = ?listing.source_price,
            destination_price = ?listing.destination_price,
            recommended = ?listing.recommended_price,
            "priced listing"
        );
        listing
    }

    async fn facts_from(&self, market: &Market, identifier: &str) -> Option<ListingFacts> {
        let url = market.listing_url(identifier);
        match self.fetcher.fetch(&url).await {
            Ok(body) => Some(self.extractor.extract(&body)),
            Err(e) => {
                warn!(
                    market = %market.name,
                    fetcher = self.fetcher.name(),
                    url,
                    error = %e,
                    "listing page unavailable"
                );
                None
            }
        }
    }
}

/// Pure pricing step over already-extracted facts.
///
/// Weight and dimensions come from the source page only; the destination
/// page contributes nothing but its observed price. Deterministic for equal
/// inputs.
pub fn price_facts(
    identifier: &str,
    markets: &MarketPair,
    cost_model: &CostModel,
    source: Option<&ListingFacts>,
    destination: Option<&ListingFacts>,
) -> PricedListing {
    let source_price = source
        .and_then(|f| f.price_text.as_deref())
        .and_then(|t| markets.source.currency.parse_price(t));
    let destination_price = destination
        .and_then(|f| f.price_text.as_deref())
        .and_then(|t| markets.destination.currency.parse_price(t));

    let weight_text = source.and_then(|f| f.weight_text.as_deref());
    let dimensions_text = source.and_then(|f| f.dimensions_text.clone());

    let declared_weight_lbs = normalize_weight(weight_text);
    let volumetric_weight_lbs = normalize_dimensions(dimensions_text.as_deref());
    let billable = effective_weight(declared_weight_lbs, volumetric_weight_lbs);

    let tiers = compute_tiers(cost_model, source_price, billable);
    let recommended_price = recommend_price(&tiers, destination_price);

    PricedListing {
        identifier: identifier.to_string(),
        source_currency: markets.source.currency,
        destination_currency: markets.destination.currency,
        source_price,
        declared_weight_lbs,
        dimensions_text,
        volumetric_weight_lbs,
        tiers,
        destination_price,
        recommended_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::profit_tiers::TierPercent;

    fn facts(price: Option<&str>, weight: Option<&str>, dims: Option<&str>) -> ListingFacts {
        ListingFacts {
            price_text: price.map(String::from),
            weight_text: weight.map(String::from),
            dimensions_text: dims.map(String::from),
        }
    }

    #[test]
    fn test_price_facts_source_only() {
        let src = facts(Some("$20.00"), Some("2 pounds"), None);
        let listing = price_facts(
            "B0TEST",
            &MarketPair::default(),
            &CostModel::default(),
            Some(&src),
            None,
        );
        assert_eq!(listing.source_price, Some(20.0));
        assert_eq!(listing.declared_weight_lbs, 2.0);
        assert_eq!(listing.volumetric_weight_lbs, 0.0);
        assert_eq!(listing.recommended_price, Some(5209));
    }

    #[test]
    fn test_destination_weight_is_ignored() {
        let src = facts(Some("$20.00"), None, None);
        let dst = facts(Some("₹9,999"), Some("40 pounds"), Some("30 x 30 x 30"));
        let listing = price_facts(
            "B0TEST",
            &MarketPair::default(),
            &CostModel::default(),
            Some(&src),
            Some(&dst),
        );
        assert_eq!(listing.declared_weight_lbs, 1.0);
        assert_eq!(listing.volumetric_weight_lbs, 0.0);
        assert!(listing.dimensions_text.is_none());
        assert_eq!(listing.destination_price, Some(9999.0));
    }

    #[test]
    fn test_volumetric_weight_drives_cost_when_larger() {
        // 20 x 20 x 20 in = 8000 / 139 ≈ 57.55 lb.
        let light = facts(Some("$20.00"), Some("1 pounds"), None);
        let bulky = facts(Some("$20.00"), Some("1 pounds"), Some("20 x 20 x 20 inches"));
        let markets = MarketPair::default();
        let model = CostModel::default();

        let a = price_facts("A", &markets, &model, Some(&light), None);
        let b = price_facts("B", &markets, &model, Some(&bulky), None);
        assert!((b.effective_weight_lbs() - 8000.0 / 139.0).abs() < 1e-9);
        assert!(
            b.tiers.get(TierPercent::Five).unwrap() > a.tiers.get(TierPercent::Five).unwrap()
        );
    }

    #[test]
    fn test_unparseable_price_means_no_tiers() {
        let src = facts(Some("See all buying options"), Some("2 pounds"), None);
        let listing = price_facts(
            "B0TEST",
            &MarketPair::default(),
            &CostModel::default(),
            Some(&src),
            None,
        );
        assert!(listing.source_price.is_none());
        assert!(listing.tiers.is_empty());
        assert!(listing.recommended_price.is_none());
        assert_eq!(listing.declared_weight_lbs, 2.0);
    }

    #[test]
    fn test_oversized_weight_leaves_recommendation_unavailable() {
        let src = facts(Some("$20.00"), Some("99999999999999999999 pounds"), None);
        let listing = price_facts(
            "B0TEST",
            &MarketPair::default(),
            &CostModel::default(),
            Some(&src),
            Some(&facts(Some("₹4,500.00"), None, None)),
        );
        assert_eq!(listing.declared_weight_lbs, 1e20);
        assert!(!listing.tiers.is_empty());
        assert!(listing.recommended_price.is_none());
        assert_eq!(listing.record().get("RecommendedPrice"), Some("unavailable"));
    }
}
