//! Margin ladder over the tax-inclusive landed cost, and the rule for
//! picking one rung as the recommended ask.

use crate::domain::values::cost_model::CostModel;
use crate::domain::values::psychological::psychological_round;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TierPercent {
    Five,
    Ten,
    Fifteen,
    Twenty,
    TwentyFive,
}

impl TierPercent {
    /// Ascending by margin.
    pub const ALL: [TierPercent; 5] = [
        TierPercent::Five,
        TierPercent::Ten,
        TierPercent::Fifteen,
        TierPercent::Twenty,
        TierPercent::TwentyFive,
    ];

    pub fn percent(&self) -> u32 {
        match self {
            TierPercent::Five => 5,
            TierPercent::Ten => 10,
            TierPercent::Fifteen => 15,
            TierPercent::Twenty => 20,
            TierPercent::TwentyFive => 25,
        }
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.percent()) / 100.0
    }
}

impl fmt::Display for TierPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl FromStr for TierPercent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('%');
        TierPercent::ALL
            .into_iter()
            .find(|t| t.percent().to_string() == digits)
            .ok_or_else(|| format!("Unknown tier: {s}"))
    }
}

impl Serialize for TierPercent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Destination-currency price at each margin tier, ascending.
///
/// Either all five tiers are present or none are (no source price).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfitTiers {
    tiers: Vec<(TierPercent, f64)>,
}

impl ProfitTiers {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn get(&self, tier: TierPercent) -> Option<f64> {
        self.tiers.iter().find(|(t, _)| *t == tier).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TierPercent, f64)> + '_ {
        self.tiers.iter().copied()
    }
}

/// Builds the five-tier ladder for a source price and billable weight.
///
/// A missing or zero source price yields empty tiers rather than a ladder
/// priced off nothing.
pub fn compute_tiers(
    model: &CostModel,
    source_price: Option<f64>,
    effective_weight_lbs: f64,
) -> ProfitTiers {
    let Some(price) = source_price.filter(|p| *p != 0.0) else {
        return ProfitTiers::empty();
    };
    let base = model.breakdown(price, effective_weight_lbs).tax_inclusive_cost;
    ProfitTiers {
        tiers: TierPercent::ALL
            .into_iter()
            .map(|t| (t, base * (1.0 + t.fraction())))
            .collect(),
    }
}

/// Picks the tier value to ask for.
///
/// With an observed destination price, the highest-margin tier that does not
/// exceed it wins; if even 5% is above the observed price, 5% is used anyway.
/// Without one, the 25% tier is used.
pub fn select_recommended_tier(
    tiers: &ProfitTiers,
    observed_price: Option<f64>,
) -> Option<(TierPercent, f64)> {
    if tiers.is_empty() {
        return None;
    }
    match observed_price.filter(|p| *p != 0.0) {
        Some(observed) => tiers
            .iter()
            .filter(|(_, v)| *v <= observed)
            .max_by_key(|(t, _)| *t)
            .or_else(|| tiers.get(TierPercent::Five).map(|v| (TierPercent::Five, v))),
        None => tiers
            .get(TierPercent::TwentyFive)
            .map(|v| (TierPercent::TwentyFive, v)),
    }
}

/// Selected tier rounded to a psychological price. `None` when there is no
/// tier or the tier value is too large to round.
pub fn recommend_price(tiers: &ProfitTiers, observed_price: Option<f64>) -> Option<u64> {
    select_recommended_tier(tiers, observed_price).and_then(|(_, v)| psychological_round(v))
}
