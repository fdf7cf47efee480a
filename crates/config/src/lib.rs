//! Configuration loading for scancache
//!
//! Layers defaults, an optional JSON file, `SCANCACHE_*` environment
//! variables, and command-line overrides into one [`ScanCacheConfig`].

pub mod config;
pub mod loader;


pub use config::{ConfigSource, RetryPolicy, ScanCacheConfig};
pub use loader::{ConfigLoader, ConfigOverrides};
