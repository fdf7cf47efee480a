//! Atomic file operations to prevent corrupted store files

use scancache_core::{Error, Result};
use std::path::Path;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Write data to a file atomically by writing to a temporary file and renaming
pub async fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::configuration("Invalid file path: no parent directory".to_string())
    })?;

    // Ensure parent directory exists
    fs::create_dir_all(parent)
        .await
        .map_err(|e| Error::file_system(parent.to_path_buf(), "create parent directory", e))?;

    // Temporary file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(".{}.tmp", Uuid::new_v4());
    let temp_path = parent.join(&temp_name);

    if let Err(e) = write_and_sync(&temp_path, content).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(Error::file_system(path.to_path_buf(), "atomic rename", e));
    }

    Ok(())
}

async fn write_and_sync(temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(temp_path)
        .await
        .map_err(|e| Error::file_system(temp_path, "create temporary file", e))?;

    file.write_all(content)
        .await
        .map_err(|e| Error::file_system(temp_path, "write to temporary file", e))?;

    file.sync_all()
        .await
        .map_err(|e| Error::file_system(temp_path, "sync temporary file", e))?;

    Ok(())
}
