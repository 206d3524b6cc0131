use serde::{Deserialize, Serialize};

/// Raw facts lifted from one listing page. Each field is independently
/// absent when the page layout did not yield it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFacts {
    pub price_text: Option<String>,
    pub weight_text: Option<String>,
    pub dimensions_text: Option<String>,
}

impl ListingFacts {
    pub fn is_empty(&self) -> bool {
        self.price_text.is_none() && self.weight_text.is_none() && self.dimensions_text.is_none()
    }
}
