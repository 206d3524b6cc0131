pub mod cost_model;
pub mod currency;
pub mod market;
pub mod profit_tiers;
pub mod psychological;
pub mod weight;
