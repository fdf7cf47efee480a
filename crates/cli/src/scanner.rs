//! Scanner workflow over the cache and the retry queue
//!
//! A scan first asks the cache. On a miss the caller resolves the barcode
//! elsewhere and reports back: a resolution is cached and clears any pending
//! retry, a failure is queued for retry.

use scancache_cache::UpcCache;
use scancache_config::ScanCacheConfig;
use scancache_core::{CachedRecord, FoodRecord, Result, RetryRecord, SharedClock};
use scancache_retry::RetryQueue;

/// Both engines opened from one configuration
#[derive(Debug, Clone)]
pub struct Scanner {
    cache: UpcCache,
    retry: RetryQueue,
}

impl Scanner {
    pub async fn open(config: &ScanCacheConfig, clock: SharedClock) -> Result<Self> {
        let cache = UpcCache::from_config(config, clock.clone()).await?;
        let retry = RetryQueue::from_config(config, clock).await?;
        tracing::debug!(
            storage_dir = %config.storage_dir.display(),
            enabled = config.scan_cache_enabled,
            "scanner ready"
        );
        Ok(Self { cache, retry })
    }

    pub fn cache(&self) -> &UpcCache {
        &self.cache
    }

    pub fn retry(&self) -> &RetryQueue {
        &self.retry
    }

    /// Cached record for `barcode`, if any
    pub async fn scan(&self, barcode: &str) -> Result<Option<CachedRecord>> {
        self.cache.lookup(barcode).await
    }

    /// A lookup succeeded: cache it and stop retrying
    pub async fn resolved(&self, barcode: &str, food: &FoodRecord) -> Result<()> {
        self.cache.store(barcode, food).await?;
        if self.retry.mark_successful(barcode).await? {
            tracing::info!(barcode = %barcode, "resolved barcode after retry");
        }
        Ok(())
    }

    /// A lookup failed: queue or reschedule the barcode
    pub async fn failed(&self, barcode: &str) -> Result<Option<RetryRecord>> {
        self.retry.add_failed_lookup(barcode).await
    }
}
