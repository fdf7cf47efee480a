//! Cache remove operations

use crate::core::types::{CacheActor, Command, UpcCache};
use scancache_core::Result;

impl UpcCache {
    /// Remove an entry from the cache
    ///
    /// Runs even when the cache is disabled. Returns whether an entry existed.
    pub async fn remove(&self, barcode: &str) -> Result<bool> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Remove { barcode, reply }).await
    }
}

impl CacheActor {
    pub(in crate::core) async fn remove(&mut self, barcode: &str) -> bool {
        if self.entries.remove(barcode).is_none() {
            return false;
        }

        tracing::debug!(barcode = %barcode, "removed record");
        self.persist().await;
        true
    }
}
