//! Recording failed and successful lookups

use crate::core::types::{Command, RetryActor, RetryQueue};
use crate::state::FailureOutcome;
use scancache_core::{Result, RetryRecord};

impl RetryQueue {
    /// Record a failed lookup for `barcode`
    ///
    /// The first failure registers the barcode as immediately retryable. Each
    /// later failure pushes the next retry back by the backoff step for the
    /// attempts made so far. A record that has already used up its attempts is
    /// dropped instead. Returns the record as it now stands, or `None` when it
    /// was dropped or the queue is disabled.
    pub async fn add_failed_lookup(&self, barcode: &str) -> Result<Option<RetryRecord>> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::AddFailed { barcode, reply }).await
    }

    /// Forget a barcode after a successful lookup; returns whether it was queued
    pub async fn mark_successful(&self, barcode: &str) -> Result<bool> {
        let barcode = barcode.to_string();
        self.request(|reply| Command::MarkSuccessful { barcode, reply }).await
    }
}

impl RetryActor {
    pub(in crate::core) async fn add_failed(&mut self, barcode: &str) -> Option<RetryRecord> {
        if !self.enabled {
            return None;
        }

        let outcome = self.state.record_failure(barcode, self.clock.now());
        let record = outcome.record();
        match &outcome {
            FailureOutcome::Registered(_) => {
                tracing::info!(barcode = %barcode, "queued failed lookup for retry");
            }
            FailureOutcome::Rescheduled(_) => {
                tracing::debug!(
                    barcode = %barcode,
                    attempts = record.attempts,
                    next_retry_time = %record.next_retry_time.to_rfc3339(),
                    "rescheduled retry"
                );
            }
            FailureOutcome::Dropped(_) => {
                tracing::info!(
                    barcode = %barcode,
                    attempts = record.attempts,
                    "retries exhausted, dropping barcode"
                );
            }
        }

        self.persist().await;
        match outcome {
            FailureOutcome::Registered(record) | FailureOutcome::Rescheduled(record) => {
                Some(record)
            }
            FailureOutcome::Dropped(_) => None,
        }
    }

    pub(in crate::core) async fn mark_successful(&mut self, barcode: &str) -> bool {
        if self.state.mark_successful(barcode).is_none() {
            return false;
        }

        tracing::debug!(barcode = %barcode, "retry succeeded, removed from queue");
        self.persist().await;
        true
    }
}
