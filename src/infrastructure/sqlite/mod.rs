pub mod migrations;
pub mod page_cache;
