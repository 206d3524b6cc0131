use crate::domain::values::currency::Currency;
use crate::domain::values::profit_tiers::{ProfitTiers, TierPercent};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Display marker for any field that could not be determined.
pub const UNAVAILABLE: &str = "unavailable";

/// Column order of the flat output record.
pub const RECORD_FIELDS: [&str; 12] = [
    "Identifier",
    "SourcePrice",
    "DeclaredWeightLbs",
    "DimensionsText",
    "VolumetricWeightLbs",
    "Tier5Profit",
    "Tier10Profit",
    "Tier15Profit",
    "Tier20Profit",
    "Tier25Profit",
    "DestinationPrice",
    "RecommendedPrice",
];

/// Pricing outcome for one identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedListing {
    pub identifier: String,
    pub source_currency: Currency,
    pub destination_currency: Currency,
    pub source_price: Option<f64>,
    /// Unrounded; rounding happens only in [`PricedListing::record`].
    pub declared_weight_lbs: f64,
    pub dimensions_text: Option<String>,
    pub volumetric_weight_lbs: f64,
    pub tiers: ProfitTiers,
    pub destination_price: Option<f64>,
    pub recommended_price: Option<u64>,
}

impl PricedListing {
    pub fn effective_weight_lbs(&self) -> f64 {
        self.declared_weight_lbs.max(self.volumetric_weight_lbs)
    }

    /// Flattens into display strings, in [`RECORD_FIELDS`] order.
    pub fn record(&self) -> ListingRecord {
        let src = self.source_currency;
        let dst = self.destination_currency;
        let money = |c: Currency, v: Option<f64>| {
            v.map(|v| c.format_amount(v))
                .unwrap_or_else(|| UNAVAILABLE.to_string())
        };
        let tier = |t: TierPercent| money(dst, self.tiers.get(t));

        let values = [
            self.identifier.clone(),
            money(src, self.source_price),
            format!("{:.2}", self.declared_weight_lbs),
            self.dimensions_text
                .clone()
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            format!("{:.2}", self.volumetric_weight_lbs),
            tier(TierPercent::Five),
            tier(TierPercent::Ten),
            tier(TierPercent::Fifteen),
            tier(TierPercent::Twenty),
            tier(TierPercent::TwentyFive),
            money(dst, self.destination_price),
            self.recommended_price
                .map(|p| format!("{}{p}", dst.symbol()))
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
        ];

        ListingRecord {
            fields: RECORD_FIELDS.into_iter().zip(values).collect(),
        }
    }
}

/// Ordered, string-keyed flat record handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    fields: Vec<(&'static str, String)>,
}

impl ListingRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }
}

// Serialized as a JSON object that keeps column order.
impl Serialize for ListingRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
