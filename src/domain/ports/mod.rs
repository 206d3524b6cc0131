pub mod listing_extractor;
pub mod listing_store;
pub mod page_cache;
pub mod page_fetcher;
