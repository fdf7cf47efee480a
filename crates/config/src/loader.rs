//! Configuration loader with precedence: defaults, file, environment, overrides

use crate::config::{ConfigFile, ConfigSource, ScanCacheConfig};
use scancache_core::{
    Error, Result, SCANCACHE_CAPACITY_VAR, SCANCACHE_CONFIG_VAR, SCANCACHE_ENABLED_VAR,
    SCANCACHE_MAX_ATTEMPTS_VAR, SCANCACHE_STORAGE_DIR_VAR,
};
use scancache_utils::XdgPaths;
use std::path::{Path, PathBuf};

/// Command-line level overrides, applied last
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub storage_dir: Option<PathBuf>,
    pub scan_cache_enabled: Option<bool>,
    pub cache_capacity: Option<usize>,
}

impl ConfigOverrides {
    fn is_empty(&self) -> bool {
        self.storage_dir.is_none()
            && self.scan_cache_enabled.is_none()
            && self.cache_capacity.is_none()
    }
}

/// Configuration loader that handles precedence
pub struct ConfigLoader {
    /// Explicit config file; falls back to `SCANCACHE_CONFIG`, then the XDG path
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            config_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Read this file instead of the default location
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Apply command-line overrides after every other layer
    pub fn overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load configuration with full precedence handling
    pub async fn load(self) -> Result<ScanCacheConfig> {
        let mut config = ScanCacheConfig::default();

        let path = self.resolve_config_path();
        let explicit = self.config_file.is_some() || std::env::var(SCANCACHE_CONFIG_VAR).is_ok();
        if let Some(file_config) = Self::load_from_config_file(&path, explicit).await? {
            Self::merge_file(&mut config, file_config);
            config.source = ConfigSource::ConfigFile(path);
        }

        Self::apply_env(&mut config)?;

        if !self.overrides.is_empty() {
            let overrides = self.overrides;
            if let Some(dir) = overrides.storage_dir {
                config.storage_dir = dir;
            }
            if let Some(enabled) = overrides.scan_cache_enabled {
                config.scan_cache_enabled = enabled;
            }
            if let Some(capacity) = overrides.cache_capacity {
                config.cache_capacity = capacity;
            }
            config.source = ConfigSource::CommandLine;
        }

        config.validate()?;
        tracing::debug!(
            source = ?config.source,
            storage_dir = %config.storage_dir.display(),
            "configuration loaded"
        );
        Ok(config)
    }

    fn resolve_config_path(&self) -> PathBuf {
        if let Some(path) = &self.config_file {
            return path.clone();
        }
        match std::env::var(SCANCACHE_CONFIG_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => XdgPaths::config_file(),
        }
    }

    /// Load configuration from config file
    ///
    /// A missing default file is fine; a missing explicitly named file is not.
    async fn load_from_config_file(path: &Path, explicit: bool) -> Result<Option<ConfigFile>> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => return Ok(None),
            Err(e) => return Err(Error::file_system(path, "read config file", e)),
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            Error::configuration(format!(
                "invalid config file '{}': {e}",
                path.display()
            ))
        })
    }

    fn merge_file(config: &mut ScanCacheConfig, file: ConfigFile) {
        if let Some(dir) = file.storage_dir {
            config.storage_dir = dir;
        }
        if let Some(enabled) = file.scan_cache_enabled {
            config.scan_cache_enabled = enabled;
        }
        if let Some(capacity) = file.cache_capacity {
            config.cache_capacity = capacity;
        }
        if let Some(retry) = file.retry {
            if let Some(max_attempts) = retry.max_attempts {
                config.retry.max_attempts = max_attempts;
            }
            if let Some(backoff) = retry.backoff_secs {
                config.retry.backoff_secs = backoff;
            }
        }
        if let Some(channel_capacity) = file.channel_capacity {
            config.channel_capacity = channel_capacity;
        }
    }

    /// Override with environment variables
    fn apply_env(config: &mut ScanCacheConfig) -> Result<()> {
        let mut touched = Vec::new();

        if let Ok(dir) = std::env::var(SCANCACHE_STORAGE_DIR_VAR) {
            config.storage_dir = PathBuf::from(dir);
            touched.push(SCANCACHE_STORAGE_DIR_VAR);
        }

        if let Ok(enabled) = std::env::var(SCANCACHE_ENABLED_VAR) {
            config.scan_cache_enabled = parse_bool(SCANCACHE_ENABLED_VAR, &enabled)?;
            touched.push(SCANCACHE_ENABLED_VAR);
        }

        if let Ok(capacity) = std::env::var(SCANCACHE_CAPACITY_VAR) {
            config.cache_capacity = capacity.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{SCANCACHE_CAPACITY_VAR} must be a positive integer, got '{capacity}'"
                ))
            })?;
            touched.push(SCANCACHE_CAPACITY_VAR);
        }

        if let Ok(attempts) = std::env::var(SCANCACHE_MAX_ATTEMPTS_VAR) {
            config.retry.max_attempts = attempts.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{SCANCACHE_MAX_ATTEMPTS_VAR} must be a positive integer, got '{attempts}'"
                ))
            })?;
            touched.push(SCANCACHE_MAX_ATTEMPTS_VAR);
        }

        if let Some(last) = touched.last() {
            config.source = ConfigSource::EnvironmentVariable((*last).to_string());
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::configuration(format!(
            "{variable} must be a boolean, got '{other}'"
        ))),
    }
}
