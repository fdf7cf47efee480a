use scancache_core::{UPC_CACHE_FILENAME, UPC_RETRY_QUEUE_FILENAME};
use std::env;
use std::path::{Path, PathBuf};

/// XDG Base Directory paths for scancache
pub struct XdgPaths;

impl XdgPaths {
    /// Get XDG_CONFIG_HOME/scancache or fallback
    pub fn config_dir() -> PathBuf {
        env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .unwrap_or_else(|| PathBuf::from(".config"))
            })
            .join("scancache")
    }

    /// Get XDG_DATA_HOME/scancache or fallback
    ///
    /// Default home of both backing documents.
    pub fn data_dir() -> PathBuf {
        env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".local/share"))
                    .unwrap_or_else(|| PathBuf::from(".local/share"))
            })
            .join("scancache")
    }

    /// Get the default configuration file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Cache document inside a storage directory
    pub fn cache_file(storage_dir: &Path) -> PathBuf {
        storage_dir.join(UPC_CACHE_FILENAME)
    }

    /// Retry queue document inside a storage directory
    pub fn retry_queue_file(storage_dir: &Path) -> PathBuf {
        storage_dir.join(UPC_RETRY_QUEUE_FILENAME)
    }
}
