mod advanced;
mod basic;

use crate::core::RetryQueue;
use chrono::{TimeZone, Utc};
use scancache_core::{ManualClock, Result};
use std::path::Path;
use std::sync::Arc;

pub(super) fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

pub(super) async fn open(dir: &Path, clock: &ManualClock) -> Result<RetryQueue> {
    RetryQueue::builder(dir)
        .clock(Arc::new(clock.clone()))
        .open()
        .await
}
