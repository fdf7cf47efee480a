//! LRU (Least Recently Used) index over cached records

use chrono::{DateTime, Utc};
use lru::LruCache;
use scancache_core::CachedRecord;
use std::collections::BTreeMap;

/// Barcode → record map that also tracks access order
///
/// The map and the order live in one `LruCache`, so every key is in both or
/// neither. The underlying cache is unbounded; `capacity` is enforced only by
/// [`LruEntries::evict_overflow`], which callers run once per mutating batch.
#[derive(Debug)]
pub struct LruEntries {
    entries: LruCache<String, CachedRecord>,
    capacity: usize,
}

impl LruEntries {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity,
        }
    }

    /// Rebuild from persisted records
    ///
    /// Persisted documents carry no access order, so records are replayed
    /// oldest `last_updated` first. Ties keep their input order.
    pub fn from_records(capacity: usize, records: impl IntoIterator<Item = CachedRecord>) -> Self {
        let mut records: Vec<CachedRecord> = records.into_iter().collect();
        records.sort_by_key(|record| record.last_updated);

        let mut index = Self::new(capacity);
        for record in records {
            index.upsert(record);
        }
        index.evict_overflow();
        index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Membership check; does not touch access order
    pub fn contains(&self, barcode: &str) -> bool {
        self.entries.contains(barcode)
    }

    /// Read without touching access order
    pub fn peek(&self, barcode: &str) -> Option<&CachedRecord> {
        self.entries.peek(barcode)
    }

    /// Hit: move to most-recently-used and stamp `last_updated`
    pub fn touch(&mut self, barcode: &str, now: DateTime<Utc>) -> Option<CachedRecord> {
        let record = self.entries.get_mut(barcode)?;
        record.last_updated = now;
        Some(record.clone())
    }

    /// Insert or overwrite, making the key most-recently-used
    pub fn upsert(&mut self, record: CachedRecord) -> Option<CachedRecord> {
        self.entries.put(record.barcode.clone(), record)
    }

    pub fn remove(&mut self, barcode: &str) -> Option<CachedRecord> {
        self.entries.pop(barcode)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop least-recently-used entries until within capacity
    ///
    /// Returns the evicted barcodes, oldest first.
    pub fn evict_overflow(&mut self) -> Vec<String> {
        let excess = self.entries.len().saturating_sub(self.capacity);
        let mut evicted = Vec::with_capacity(excess);
        while self.entries.len() > self.capacity {
            match self.entries.pop_lru() {
                Some((barcode, _)) => evicted.push(barcode),
                None => break,
            }
        }
        evicted
    }

    /// Barcodes from least to most recently used
    pub fn order(&self) -> Vec<String> {
        self.entries.iter().rev().map(|(barcode, _)| barcode.clone()).collect()
    }

    pub fn oldest_update(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|(_, r)| r.last_updated).min()
    }

    pub fn newest_update(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|(_, r)| r.last_updated).max()
    }

    /// Key-sorted copy of every record, the persisted document shape
    pub fn to_document(&self) -> BTreeMap<String, CachedRecord> {
        self.entries
            .iter()
            .map(|(barcode, record)| (barcode.clone(), record.clone()))
            .collect()
    }
}
