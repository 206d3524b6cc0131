use crate::domain::values::currency::Currency;
use serde::Serialize;

/// A regional marketplace: where listing pages live and what they are priced in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    pub name: String,
    pub base_url: String,
    pub currency: Currency,
}

impl Market {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, currency: Currency) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            currency,
        }
    }

    /// Listing page URL for an identifier. The identifier is not validated;
    /// a bogus one simply produces a page that fails to fetch.
    pub fn listing_url(&self, identifier: &str) -> String {
        format!("{}/dp/{}", self.base_url, identifier)
    }
}

/// Where goods are bought (source) and where they are resold (destination).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPair {
    pub source: Market,
    pub destination: Market,
}

impl Default for MarketPair {
    fn default() -> Self {
        Self {
            source: Market::new("amazon.com", "https://www.amazon.com", Currency::Usd),
            destination: Market::new("amazon.in", "https://www.amazon.in", Currency::Inr),
        }
    }
}
