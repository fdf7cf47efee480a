//! Cache lookup operations

use crate::core::types::{CacheActor, Command, UpcCache};
use scancache_core::{CachedRecord, Result};
use scancache_utils::tracing::cache_event;

impl UpcCache {
    /// Look up a barcode
    ///
    /// A hit becomes the most recently used entry and its `last_updated` is
    /// refreshed. The refreshed timestamp reaches disk with the next mutation.
    pub async fn lookup(&self, barcode: &str) -> Result<Option<CachedRecord>> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Lookup { barcode, reply }).await
    }

    /// Membership check that leaves access order alone
    pub async fn contains(&self, barcode: &str) -> Result<bool> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Contains { barcode, reply }).await
    }
}

impl CacheActor {
    pub(in crate::core) fn lookup(&mut self, barcode: &str) -> Option<CachedRecord> {
        if !self.enabled {
            return None;
        }

        let now = self.clock.now();
        let hit = self.entries.touch(barcode, now);
        cache_event(barcode, hit.is_some());
        hit
    }
}
