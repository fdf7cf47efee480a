//! Persistent LRU cache of barcode lookups for scancache
//!
//! Successful barcode resolutions are snapshotted into [`CachedRecord`]s and
//! kept in a bounded, least-recently-used index that is persisted as a single
//! JSON document (`upc_cache.json`) in the storage directory.
//!
//! ```no_run
//! # async fn demo() -> scancache_core::Result<()> {
//! use scancache_cache::UpcCache;
//! use scancache_core::FoodRecord;
//!
//! let cache = UpcCache::builder("/tmp/scancache").open().await?;
//! let food = FoodRecord::new("Almond Butter").with_macros(3.0, 6.0, 16.0, 7.0);
//! cache.store("042343370210", &food).await?;
//! assert!(cache.lookup("042343370210").await?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod eviction;
pub mod serialization;

pub use crate::core::{UpcCache, UpcCacheBuilder};
pub use eviction::LruEntries;
pub use scancache_core::{CacheStats, CachedRecord, Error, FoodRecord, Result};
