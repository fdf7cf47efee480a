//! Core cache types and structures

use crate::eviction::LruEntries;
use scancache_core::{CacheStats, CachedRecord, FoodRecord, Result, SharedClock};
use scancache_utils::JsonStore;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

pub(crate) const ENGINE: &str = "upc cache";

/// Handle to the UPC cache actor
///
/// Cloning is cheap; every clone talks to the same actor, which applies
/// commands one at a time in arrival order.
#[derive(Clone)]
pub struct UpcCache {
    pub(super) tx: mpsc::Sender<Command>,
    pub(super) enabled: bool,
    pub(super) capacity: usize,
}

impl std::fmt::Debug for UpcCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpcCache")
            .field("enabled", &self.enabled)
            .field("capacity", &self.capacity)
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

impl UpcCache {
    /// Whether the feature flag was on when this cache was opened
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Messages understood by the cache actor
pub(crate) enum Command {
    Lookup {
        barcode: String,
        reply: oneshot::Sender<Option<CachedRecord>>,
    },
    Store {
        barcode: String,
        food: FoodRecord,
        reply: oneshot::Sender<()>,
    },
    BatchUpdate {
        foods: HashMap<String, FoodRecord>,
        reply: oneshot::Sender<usize>,
    },
    Remove {
        barcode: String,
        reply: oneshot::Sender<bool>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
    Contains {
        barcode: String,
        reply: oneshot::Sender<bool>,
    },
    Export {
        reply: oneshot::Sender<Result<Vec<u8>>>,
    },
    Import {
        blob: Vec<u8>,
        reply: oneshot::Sender<Result<usize>>,
    },
    Stats {
        reply: oneshot::Sender<CacheStats>,
    },
}

/// State owned exclusively by the actor task
pub(crate) struct CacheActor {
    pub entries: LruEntries,
    pub file: JsonStore,
    pub enabled: bool,
    pub clock: SharedClock,
}
