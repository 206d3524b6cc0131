//! Landed-cost model.
//!
//! Turns a source-market price and a billable weight into the tax-inclusive
//! cost of putting the item on the destination market:
//!
//! ```text
//! landed    = price × rate
//! product   = landed × (1 + import_markup)
//! shipping  = weight × shipping_per_lb × rate
//! domestic  = weight × domestic_per_lb
//! subtotal  = product + shipping + domestic
//! fee       = subtotal × platform_fee
//! total     = (subtotal + fee) × (1 + tax)
//! ```

use serde::Serialize;

/// Pricing constants. Amounts without a currency note are in the
/// destination currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostModel {
    /// Destination currency units per source currency unit.
    pub exchange_rate: f64,
    /// Import/customs markup on goods value.
    pub import_markup: f64,
    /// International shipping per pound, in source currency.
    pub shipping_per_lb: f64,
    /// Domestic handling per pound.
    pub domestic_per_lb: f64,
    /// Marketplace fee on the cost subtotal.
    pub platform_fee: f64,
    /// Consumption tax on subtotal plus fee.
    pub tax: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            exchange_rate: 87.0,
            import_markup: 0.20,
            shipping_per_lb: 5.0,
            domestic_per_lb: 200.0,
            platform_fee: 0.05,
            tax: 0.18,
        }
    }
}

/// Every intermediate of the cost formula, kept for display and auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub landed_cost: f64,
    pub product_cost: f64,
    pub shipping_cost: f64,
    pub domestic_cost: f64,
    pub subtotal: f64,
    pub platform_fee: f64,
    pub tax_inclusive_cost: f64,
}

impl CostModel {
    pub fn with_exchange_rate(mut self, rate: f64) -> Self {
        self.exchange_rate = rate;
        self
    }

    pub fn breakdown(&self, source_price: f64, effective_weight_lbs: f64) -> CostBreakdown {
        let landed_cost = source_price * self.exchange_rate;
        let product_cost = landed_cost * (1.0 + self.import_markup);
        let shipping_cost = effective_weight_lbs * self.shipping_per_lb * self.exchange_rate;
        let domestic_cost = effective_weight_lbs * self.domestic_per_lb;
        let subtotal = product_cost + shipping_cost + domestic_cost;
        let platform_fee = subtotal * self.platform_fee;
        let tax_inclusive_cost = (subtotal + platform_fee) * (1.0 + self.tax);

        CostBreakdown {
            landed_cost,
            product_cost,
            shipping_cost,
            domestic_cost,
            subtotal,
            platform_fee,
            tax_inclusive_cost,
        }
    }
}
