//! Retry queue for barcode lookups that failed
//!
//! A failed lookup is registered once and handed back by
//! [`RetryQueue::ready_for_retry`] on a widening schedule (30 seconds, then
//! two minutes, then ten). After the last scheduled attempt the record is
//! expired; one more failure drops it. The queue is persisted as a JSON array
//! (`upc_retry_queue.json`) sorted by next eligible retry time.

pub mod core;
pub mod state;

pub use crate::core::{RetryQueue, RetryQueueBuilder};
pub use scancache_config::RetryPolicy;
pub use scancache_core::{Error, Result, RetryRecord, RetryStats};
pub use state::{FailureOutcome, RetryState};
