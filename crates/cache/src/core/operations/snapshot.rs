//! Snapshot export and import

use crate::core::types::{CacheActor, Command, UpcCache};
use crate::serialization::{self, CacheDocument};
use scancache_core::Result;

impl UpcCache {
    /// Serialize the whole cache to its canonical JSON document
    ///
    /// A disabled cache exports an empty document.
    pub async fn export_snapshot(&self) -> Result<Vec<u8>> {
        self.request(|reply| Command::Export { reply }).await?
    }

    /// Merge a previously exported document into the cache
    ///
    /// Imported records win over existing ones. A malformed blob is rejected
    /// as a whole with a decode error and nothing is merged. Returns the number
    /// of imported records (zero when disabled).
    pub async fn import_snapshot(&self, blob: Vec<u8>) -> Result<usize> {
        self.request(|reply| Command::Import { blob, reply }).await?
    }
}

impl CacheActor {
    pub(in crate::core) fn export(&self) -> Result<Vec<u8>> {
        if !self.enabled {
            return serialization::encode(&CacheDocument::new());
        }
        serialization::encode(&self.entries.to_document())
    }

    pub(in crate::core) async fn import(&mut self, blob: &[u8]) -> Result<usize> {
        if !self.enabled {
            return Ok(0);
        }

        let document = serialization::decode(blob)?;
        let count = document.len();

        // Same replay order as a load from disk: oldest update first
        let mut records: Vec<_> = document.into_values().collect();
        records.sort_by_key(|record| record.last_updated);
        for record in records {
            self.entries.upsert(record);
        }

        tracing::info!(imported = count, "imported upc cache snapshot");
        self.evict();
        self.persist().await;
        Ok(count)
    }
}
