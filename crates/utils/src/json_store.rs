//! Whole-document JSON persistence shared by the cache and the retry queue
//!
//! Each engine keeps one JSON document. Loading distinguishes a missing file
//! from a corrupt one so callers can log the difference; both start empty.
//! Saving always goes through [`write_atomic`].

use crate::atomic_file::write_atomic;
use scancache_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Outcome of reading a store document from disk
#[derive(Debug)]
pub enum Loaded<T> {
    /// The file parsed successfully
    Document(T),
    /// No file at the path yet
    Missing,
    /// The file exists but could not be read or parsed
    Corrupt(Error),
}

impl<T> Loaded<T> {
    /// Collapse to the document, falling back to `T::default()`
    pub fn or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Loaded::Document(doc) => doc,
            Loaded::Missing | Loaded::Corrupt(_) => T::default(),
        }
    }
}

/// A JSON document at a fixed path
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the document
    pub async fn load<T: DeserializeOwned>(&self) -> Loaded<T> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Loaded::Missing,
            Err(e) => return Loaded::Corrupt(Error::file_system(&self.path, "read store", e)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => Loaded::Document(doc),
            Err(e) => Loaded::Corrupt(Error::from(e)),
        }
    }

    /// Encode and atomically replace the document
    pub async fn save<T: Serialize + ?Sized>(&self, document: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)?;
        write_atomic(&self.path, &bytes).await
    }

    /// Size of the document on disk, zero if absent
    pub async fn file_size(&self) -> u64 {
        match fs::metadata(&self.path).await {
            Ok(metadata) => metadata.len(),
            Err(_) => 0,
        }
    }

    /// Delete the document if present
    pub async fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::file_system(&self.path, "remove store", e)),
        }
    }
}
