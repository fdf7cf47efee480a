//! In-memory retry queue
//!
//! [`RetryState`] holds the records sorted by `next_retry_time` and applies
//! the backoff policy. It does no I/O and never reads the clock; the actor
//! passes "now" in and decides when to persist.

use chrono::{DateTime, Utc};
use scancache_config::RetryPolicy;
use scancache_core::{RetryRecord, RetryStats};
use std::time::Duration;

/// What a recorded failure did to the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    /// First failure for this barcode; eligible immediately
    Registered(RetryRecord),
    /// Known barcode pushed back by the next backoff step
    Rescheduled(RetryRecord),
    /// The record had already used up its attempts and was removed
    Dropped(RetryRecord),
}

impl FailureOutcome {
    pub fn record(&self) -> &RetryRecord {
        match self {
            FailureOutcome::Registered(record)
            | FailureOutcome::Rescheduled(record)
            | FailureOutcome::Dropped(record) => record,
        }
    }
}

/// Failed-lookup records ordered by next eligible retry
#[derive(Debug, Clone, Default)]
pub struct RetryState {
    records: Vec<RetryRecord>,
    policy: RetryPolicy,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Rebuild from persisted records
    ///
    /// Duplicate barcodes keep the first occurrence; the result is re-sorted
    /// regardless of the order on disk.
    pub fn from_records(
        policy: RetryPolicy,
        records: impl IntoIterator<Item = RetryRecord>,
    ) -> Self {
        let mut state = Self::new(policy);
        for record in records {
            if state.contains(&record.barcode) {
                tracing::debug!(barcode = %record.barcode, "skipping duplicate retry record");
                continue;
            }
            state.records.push(record);
        }
        state.sort();
        state
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in retry order
    pub fn records(&self) -> &[RetryRecord] {
        &self.records
    }

    pub fn get(&self, barcode: &str) -> Option<&RetryRecord> {
        self.records.iter().find(|record| record.barcode == barcode)
    }

    pub fn contains(&self, barcode: &str) -> bool {
        self.get(barcode).is_some()
    }

    /// Apply one failed lookup at `now`
    pub fn record_failure(&mut self, barcode: &str, now: DateTime<Utc>) -> FailureOutcome {
        let Some(index) = self.position(barcode) else {
            let record = RetryRecord::first_failure(barcode, now);
            self.records.push(record.clone());
            self.sort();
            return FailureOutcome::Registered(record);
        };

        if self.records[index].is_expired(self.policy.max_attempts) {
            return FailureOutcome::Dropped(self.records.remove(index));
        }

        let delay = self.policy.backoff_for(self.records[index].attempts);
        let record = &mut self.records[index];
        record.last_attempt = now;
        record.next_retry_time = schedule(now, delay);
        record.attempts += 1;
        let record = record.clone();

        self.sort();
        FailureOutcome::Rescheduled(record)
    }

    /// Forget a barcode whose lookup succeeded
    pub fn mark_successful(&mut self, barcode: &str) -> Option<RetryRecord> {
        self.remove(barcode)
    }

    pub fn remove(&mut self, barcode: &str) -> Option<RetryRecord> {
        let index = self.position(barcode)?;
        Some(self.records.remove(index))
    }

    /// Drop every record, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    /// Barcodes eligible at `now`, in retry order, at most `max_items`
    pub fn ready(&self, now: DateTime<Utc>, max_items: usize) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.is_ready(now, self.policy.max_attempts))
            .take(max_items)
            .map(|record| record.barcode.clone())
            .collect()
    }

    /// Remove records that used up their attempts, returning how many went
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.records.len();
        let max_attempts = self.policy.max_attempts;
        self.records.retain(|record| !record.is_expired(max_attempts));
        before - self.records.len()
    }

    /// Counts at `now`; the file size is left for the caller to fill in
    pub fn stats(&self, now: DateTime<Utc>) -> RetryStats {
        let max_attempts = self.policy.max_attempts;
        let expired_count = self
            .records
            .iter()
            .filter(|record| record.is_expired(max_attempts))
            .count();
        let ready_count = self
            .records
            .iter()
            .filter(|record| record.is_ready(now, max_attempts))
            .count();

        RetryStats {
            total: self.records.len(),
            ready_count,
            pending_count: self.records.len() - ready_count - expired_count,
            expired_count,
            file_size_bytes: 0,
        }
    }

    fn position(&self, barcode: &str) -> Option<usize> {
        self.records.iter().position(|record| record.barcode == barcode)
    }

    fn sort(&mut self) {
        self.records.sort_by_key(|record| record.next_retry_time);
    }
}

fn schedule(at: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(delay)
        .ok()
        .and_then(|delay| at.checked_add_signed(delay))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
