//! Retry queue builder and initialization

use crate::state::RetryState;
use scancache_config::{RetryPolicy, ScanCacheConfig};
use scancache_core::{system_clock, Error, Result, SharedClock, DEFAULT_CHANNEL_CAPACITY};
use scancache_utils::{JsonStore, XdgPaths};
use std::path::PathBuf;
use tokio::sync::mpsc;

use super::types::{RetryActor, RetryQueue};

/// Builder for [`RetryQueue`]
#[derive(Debug, Clone)]
pub struct RetryQueueBuilder {
    storage_dir: PathBuf,
    enabled: bool,
    policy: RetryPolicy,
    channel_capacity: usize,
    clock: SharedClock,
}

impl RetryQueueBuilder {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            enabled: true,
            policy: RetryPolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            clock: system_clock(),
        }
    }

    /// Feature flag value; captured once
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
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

    /// Spawn the actor; must be called from within a tokio runtime
    pub async fn open(self) -> Result<RetryQueue> {
        if self.policy.max_attempts == 0 {
            return Err(Error::configuration("retry max_attempts must be at least 1"));
        }
        if self.policy.backoff_secs.is_empty() {
            return Err(Error::configuration("retry backoff schedule must not be empty"));
        }
        if self.channel_capacity == 0 {
            return Err(Error::configuration(
                "retry queue channel capacity must be at least 1",
            ));
        }

        let path = XdgPaths::retry_queue_file(&self.storage_dir);
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let max_attempts = self.policy.max_attempts;

        let actor = RetryActor {
            state: RetryState::new(self.policy),
            file: JsonStore::new(path),
            enabled: self.enabled,
            clock: self.clock,
        };

        if !self.enabled {
            tracing::info!("scan cache disabled, failed lookups are not queued");
        }

        tokio::spawn(actor.run(rx));

        Ok(RetryQueue {
            tx,
            enabled: self.enabled,
            max_attempts,
        })
    }
}

impl RetryQueue {
    pub fn builder(storage_dir: impl Into<PathBuf>) -> RetryQueueBuilder {
        RetryQueueBuilder::new(storage_dir)
    }

    /// Open the queue described by a loaded configuration
    pub async fn from_config(config: &ScanCacheConfig, clock: SharedClock) -> Result<Self> {
        Self::builder(&config.storage_dir)
            .enabled(config.scan_cache_enabled)
            .policy(config.retry.clone())
            .channel_capacity(config.channel_capacity)
            .clock(clock)
            .open()
            .await
    }
}
