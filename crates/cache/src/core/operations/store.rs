//! Cache store operations

use crate::core::types::{CacheActor, Command, UpcCache};
use scancache_core::{CachedRecord, FoodRecord, Result};
use std::collections::HashMap;

impl UpcCache {
    /// Snapshot a food record under a barcode
    pub async fn store(&self, barcode: &str, food: &FoodRecord) -> Result<()> {
        let barcode = barcode.to_string();
        let food = food.clone();
        self.request(|reply| Command::Store {
            barcode,
            food,
            reply,
        })
        .await
    }

    /// Store many records with a single eviction pass and a single write
    ///
    /// Returns how many records were stored (zero when disabled).
    pub async fn batch_update(&self, foods: HashMap<String, FoodRecord>) -> Result<usize> {
        self.request(|reply| Command::BatchUpdate { foods, reply }).await
    }
}

impl CacheActor {
    pub(in crate::core) async fn store(&mut self, barcode: String, food: &FoodRecord) {
        if !self.enabled {
            return;
        }

        let record = CachedRecord::snapshot(barcode, food, self.clock.now());
        tracing::debug!(barcode = %record.barcode, food_id = %record.food_id, "storing record");
        self.entries.upsert(record);
        self.evict();
        self.persist().await;
    }

    pub(in crate::core) async fn batch_update(
        &mut self,
        foods: HashMap<String, FoodRecord>,
    ) -> usize {
        if !self.enabled || foods.is_empty() {
            return 0;
        }

        let now = self.clock.now();
        let count = foods.len();
        for (barcode, food) in foods {
            self.entries.upsert(CachedRecord::snapshot(barcode, &food, now));
        }
        tracing::debug!(count, "batch stored records");

        self.evict();
        self.persist().await;
        count
    }
}
