//! Cache clear operations

use crate::core::types::{CacheActor, Command, UpcCache, ENGINE};
use scancache_core::Result;
use scancache_utils::tracing::persistence_failed;

impl UpcCache {
    /// Clear all entries from the cache
    ///
    /// Runs even when the cache is disabled; in that case any leftover backing
    /// file is deleted rather than rewritten.
    pub async fn clear(&self) -> Result<()> {
        self.request(|reply| Command::Clear { reply }).await
    }
}

impl CacheActor {
    pub(in crate::core) async fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        tracing::debug!(dropped, "cleared upc cache");

        if self.enabled {
            self.persist().await;
        } else if let Err(e) = self.file.delete().await {
            persistence_failed(ENGINE, &e);
        }
    }
}
