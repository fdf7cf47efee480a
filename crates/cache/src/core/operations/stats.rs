//! Cache statistics operations

use crate::core::types::{CacheActor, Command, UpcCache};
use scancache_core::{CacheStats, Result};

impl UpcCache {
    /// Get cache statistics
    pub async fn stats(&self) -> Result<CacheStats> {
        self.request(|reply| Command::Stats { reply }).await
    }
}

impl CacheActor {
    pub(in crate::core) async fn stats(&self) -> CacheStats {
        if !self.enabled {
            return CacheStats::default();
        }

        CacheStats {
            total_entries: self.entries.len(),
            oldest_entry: self.entries.oldest_update(),
            newest_entry: self.entries.newest_update(),
            file_size_bytes: self.file.file_size().await,
        }
    }
}
