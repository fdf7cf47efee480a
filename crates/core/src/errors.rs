use std::path::PathBuf;

/// Result type alias for scancache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for scancache operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A snapshot blob handed to an import could not be decoded
    #[error("failed to decode snapshot: {message}")]
    SnapshotDecode {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The engine's background task is no longer receiving commands
    #[error("{engine} engine has stopped")]
    EngineStopped { engine: &'static str },
}

// Conversion implementations
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a snapshot decode error
    #[must_use]
    pub fn snapshot_decode(source: serde_json::Error) -> Self {
        Error::SnapshotDecode {
            message: source.to_string(),
            source,
        }
    }

    /// Create an engine-stopped error
    #[must_use]
    pub fn engine_stopped(engine: &'static str) -> Self {
        Error::EngineStopped { engine }
    }

    /// Whether this error came from decoding a snapshot
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::SnapshotDecode { .. } | Error::Json { .. })
    }
}
