pub mod listing_cache;
pub mod storage;
pub mod upload;
