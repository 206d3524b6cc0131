pub mod listing_extractor;
