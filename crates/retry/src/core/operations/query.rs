//! Read-only retry queue accessors

use crate::core::types::{Command, RetryActor, RetryQueue};
use scancache_core::{Result, RetryRecord, DEFAULT_READY_BATCH};

impl RetryQueue {
    /// Barcodes due for another attempt, in retry order, at most `max_items`
    pub async fn ready_for_retry(&self, max_items: usize) -> Result<Vec<String>> {
        self.request(|reply| Command::Ready { max_items, reply }).await
    }

    /// [`ready_for_retry`](Self::ready_for_retry) with the default batch size
    pub async fn next_batch(&self) -> Result<Vec<String>> {
        self.ready_for_retry(DEFAULT_READY_BATCH).await
    }

    pub async fn get_item(&self, barcode: &str) -> Result<Option<RetryRecord>> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Get { barcode, reply }).await
    }

    pub async fn contains(&self, barcode: &str) -> Result<bool> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Contains { barcode, reply }).await
    }

    /// Every record in retry order
    pub async fn all_items(&self) -> Result<Vec<RetryRecord>> {
        self.request(|reply| Command::All { reply }).await
    }
}

impl RetryActor {
    pub(in crate::core) fn ready(&self, max_items: usize) -> Vec<String> {
        if !self.enabled {
            return Vec::new();
        }
        self.state.ready(self.clock.now(), max_items)
    }
}
