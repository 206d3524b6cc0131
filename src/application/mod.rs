pub mod batch;
pub mod price_listing;
