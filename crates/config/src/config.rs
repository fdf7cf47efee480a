//! Runtime configuration for the scan cache engines

use scancache_core::{
    Error, Result, DEFAULT_BACKOFF_SCHEDULE, DEFAULT_CACHE_CAPACITY, DEFAULT_CHANNEL_CAPACITY,
    DEFAULT_MAX_ATTEMPTS,
};
use scancache_utils::XdgPaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Retry scheduling for failed lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Records with this many attempts are expired
    pub max_attempts: u32,
    /// Delay before the next retry, indexed by attempts made so far (clamped)
    pub backoff_secs: Vec<u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_secs: DEFAULT_BACKOFF_SCHEDULE
                .iter()
                .map(Duration::as_secs)
                .collect(),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after a failure when `attempts` retries were already made
    ///
    /// `attempts` is the record's count before this failure is applied, so the
    /// first failed retry waits the first step. Past the end of the schedule the
    /// last step repeats.
    #[must_use]
    pub fn backoff_for(&self, attempts: u32) -> Duration {
        let Some(last) = self.backoff_secs.len().checked_sub(1) else {
            return Duration::ZERO;
        };
        let index = (attempts as usize).min(last);
        Duration::from_secs(self.backoff_secs[index])
    }
}

/// Configuration shared by the cache and the retry queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCacheConfig {
    /// Directory holding both backing documents
    pub storage_dir: PathBuf,
    /// Feature flag captured by each engine at construction
    pub scan_cache_enabled: bool,
    /// Maximum number of resident cache entries
    pub cache_capacity: usize,
    /// Retry queue scheduling
    pub retry: RetryPolicy,
    /// Mailbox depth of each engine's actor
    pub channel_capacity: usize,
    /// Where the last applied layer came from
    pub source: ConfigSource,
}

impl Default for ScanCacheConfig {
    fn default() -> Self {
        Self {
            storage_dir: XdgPaths::data_dir(),
            scan_cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            retry: RetryPolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            source: ConfigSource::Default,
        }
    }
}

impl ScanCacheConfig {
    /// Defaults rooted at a given storage directory
    #[must_use]
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }

    /// Reject values the engines cannot operate with
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(Error::configuration("cache_capacity must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(Error::configuration("retry.max_attempts must be at least 1"));
        }
        if self.retry.backoff_secs.is_empty() {
            return Err(Error::configuration("retry.backoff_secs must not be empty"));
        }
        if self.channel_capacity == 0 {
            return Err(Error::configuration("channel_capacity must be at least 1"));
        }
        Ok(())
    }
}

/// Source of configuration for debugging and precedence tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default configuration
    Default,
    /// Configuration file
    ConfigFile(PathBuf),
    /// Environment variable
    EnvironmentVariable(String),
    /// Command line argument
    CommandLine,
}

/// Partial configuration as read from a file; absent keys keep earlier values
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub storage_dir: Option<PathBuf>,
    pub scan_cache_enabled: Option<bool>,
    pub cache_capacity: Option<usize>,
    pub retry: Option<RetryFile>,
    pub channel_capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RetryFile {
    pub max_attempts: Option<u32>,
    pub backoff_secs: Option<Vec<u64>>,
}
