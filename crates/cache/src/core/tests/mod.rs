
use crate::core::UpcCache;
use chrono::{TimeZone, Utc};
use scancache_core::{FoodRecord, ManualClock, Result};
use std::path::Path;
use std::sync::Arc;

pub(super) fn almond_butter() -> FoodRecord {
    FoodRecord::new("Almond Butter")
        .with_brand("Justin's")
        .with_macros(3.0, 6.0, 16.0, 7.0)
        .with_kcal(190.0)
        .with_serving_size(32.0)
}

pub(super) fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

pub(super) async fn open(dir: &Path, capacity: usize, clock: &ManualClock) -> Result<UpcCache> {
    UpcCache::builder(dir)
        .capacity(capacity)
        .clock(Arc::new(clock.clone()))
        .open()
        .await
}
