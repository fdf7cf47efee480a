//! Eviction policy for the UPC cache
//!
//! A single least-recently-used policy with an entry-count bound.

mod lru;

pub use self::lru::LruEntries;
