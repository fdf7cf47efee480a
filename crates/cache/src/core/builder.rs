//! Cache builder and initialization

use crate::eviction::LruEntries;
use scancache_config::ScanCacheConfig;
use scancache_core::{
    system_clock, Error, Result, SharedClock, DEFAULT_CACHE_CAPACITY, DEFAULT_CHANNEL_CAPACITY,
};
use scancache_utils::{JsonStore, XdgPaths};
use std::path::PathBuf;
use tokio::sync::mpsc;

use super::types::{CacheActor, UpcCache};

/// Builder for [`UpcCache`]
#[derive(Debug, Clone)]
pub struct UpcCacheBuilder {
    storage_dir: PathBuf,
    enabled: bool,
    capacity: usize,
    channel_capacity: usize,
    clock: SharedClock,
}

impl UpcCacheBuilder {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            enabled: true,
            capacity: DEFAULT_CACHE_CAPACITY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            clock: system_clock(),
        }
    }

    /// Feature flag value; captured once, the cache never re-reads it
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Maximum number of resident entries
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn channel_capacity(mut self, channel_capacity: usize) -> Self {
        self.channel_capacity = channel_capacity;
        self
    }

    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Spawn the actor; the backing file is loaded before the first command runs
    ///
    /// Must be called from within a tokio runtime.
    pub async fn open(self) -> Result<UpcCache> {
        if self.capacity == 0 {
            return Err(Error::configuration("upc cache capacity must be at least 1"));
        }
        if self.channel_capacity == 0 {
            return Err(Error::configuration(
                "upc cache channel capacity must be at least 1",
            ));
        }

        let path = XdgPaths::cache_file(&self.storage_dir);
        let (tx, rx) = mpsc::channel(self.channel_capacity);

        let actor = CacheActor {
            entries: LruEntries::new(self.capacity),
            file: JsonStore::new(path),
            enabled: self.enabled,
            clock: self.clock,
        };

        if !self.enabled {
            tracing::info!("scan cache disabled, upc cache operations are no-ops");
        }

        tokio::spawn(actor.run(rx));

        Ok(UpcCache {
            tx,
            enabled: self.enabled,
            capacity: self.capacity,
        })
    }
}

impl UpcCache {
    pub fn builder(storage_dir: impl Into<PathBuf>) -> UpcCacheBuilder {
        UpcCacheBuilder::new(storage_dir)
    }

    /// Open the cache described by a loaded configuration
    pub async fn from_config(config: &ScanCacheConfig, clock: SharedClock) -> Result<Self> {
        Self::builder(&config.storage_dir)
            .enabled(config.scan_cache_enabled)
            .capacity(config.cache_capacity)
            .channel_capacity(config.channel_capacity)
            .clock(clock)
            .open()
            .await
    }
}
