//! Removal and cleanup

use crate::core::types::{Command, RetryActor, RetryQueue, ENGINE};
use scancache_core::Result;
use scancache_utils::tracing::persistence_failed;

impl RetryQueue {
    /// Drop a barcode regardless of its state; returns whether it was queued
    pub async fn remove(&self, barcode: &str) -> Result<bool> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::Remove { barcode, reply }).await
    }

    /// Drop every record
    ///
    /// Runs even when disabled; in that case a leftover backing file is deleted.
    pub async fn clear(&self) -> Result<()> {
        self.request(|reply| Command::Clear { reply }).await
    }

    /// Remove records that used up their attempts; returns how many were removed
    pub async fn cleanup_expired(&self) -> Result<usize> {
        self.request(|reply| Command::CleanupExpired { reply }).await
    }
}

impl RetryActor {
    pub(in crate::core) async fn remove(&mut self, barcode: &str) -> bool {
        if self.state.remove(barcode).is_none() {
            return false;
        }

        tracing::debug!(barcode = %barcode, "removed retry record");
        self.persist().await;
        true
    }

    pub(in crate::core) async fn clear(&mut self) {
        let dropped = self.state.clear();
        tracing::debug!(dropped, "cleared retry queue");

        if self.enabled {
            self.persist().await;
        } else if let Err(e) = self.file.delete().await {
            persistence_failed(ENGINE, &e);
        }
    }

    pub(in crate::core) async fn cleanup_expired(&mut self) -> usize {
        let removed = self.state.cleanup_expired();
        if removed > 0 {
            tracing::info!(removed, "removed expired retry records");
            self.persist().await;
        }
        removed
    }
}
