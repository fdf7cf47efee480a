//! Retry queue statistics

use crate::core::types::{Command, RetryActor, RetryQueue};
use scancache_core::{Result, RetryStats};

impl RetryQueue {
    /// Counts computed against the current time
    pub async fn stats(&self) -> Result<RetryStats> {
        self.request(|reply| Command::Stats { reply }).await
    }
}

impl RetryActor {
    pub(in crate::core) async fn stats(&self) -> RetryStats {
        if !self.enabled {
            return RetryStats::default();
        }

        RetryStats {
            file_size_bytes: self.file.file_size().await,
            ..self.state.stats(self.clock.now())
        }
    }
}
