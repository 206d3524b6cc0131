pub mod listing_store;
