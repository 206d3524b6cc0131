pub mod listing_facts;
pub mod priced_listing;
