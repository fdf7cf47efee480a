/// Constants used throughout the scancache codebase
use std::time::Duration;

// Backing file names, stable across restarts
pub const UPC_CACHE_FILENAME: &str = "upc_cache.json";
pub const UPC_RETRY_QUEUE_FILENAME: &str = "upc_retry_queue.json";

// Cache sizing
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

// Retry policy
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF_SCHEDULE: [Duration; 3] = [
    Duration::from_secs(30),
    Duration::from_secs(120),
    Duration::from_secs(600),
];
pub const DEFAULT_READY_BATCH: usize = 20;

// Actor mailbox depth
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// Environment variable names
pub const SCANCACHE_LOG_VAR: &str = "SCANCACHE_LOG";
pub const SCANCACHE_STORAGE_DIR_VAR: &str = "SCANCACHE_STORAGE_DIR";
pub const SCANCACHE_ENABLED_VAR: &str = "SCANCACHE_SCAN_CACHE_ENABLED";
pub const SCANCACHE_CAPACITY_VAR: &str = "SCANCACHE_CACHE_CAPACITY";
pub const SCANCACHE_MAX_ATTEMPTS_VAR: &str = "SCANCACHE_RETRY_MAX_ATTEMPTS";
pub const SCANCACHE_CONFIG_VAR: &str = "SCANCACHE_CONFIG";
