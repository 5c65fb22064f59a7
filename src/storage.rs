//! Filesystem helpers: page cache file and output directory.
//!
//! Presence checks here are the only dedup and caching mechanism the scraper
//! has; nothing else is persisted.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Permission bits for a newly created output directory (Unix only).
pub const OUTPUT_DIR_MODE: u32 = 0o755;

/// Permission bits for a newly created page cache file (Unix only).
pub const CACHE_FILE_MODE: u32 = 0o644;

/// Errors from local file operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Creating a directory failed.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Opening or writing a file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reading a file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Returns `true` if `path` exists and is a regular file.
pub async fn file_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

/// Returns `true` if `path` exists and is a directory.
pub async fn dir_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_dir())
}

/// Creates the output directory (one level, mode `0o755`) unless it exists.
///
/// Returns `true` when the directory was created by this call.
///
/// # Errors
///
/// Returns `StorageError::CreateDir` when the directory is missing and cannot
/// be created (missing parent, permissions, a file in the way).
pub async fn ensure_output_dir(path: &Path) -> Result<bool, StorageError> {
    if dir_exists(path).await {
        debug!(path = %path.display(), "output directory exists");
        return Ok(false);
    }

    let mut builder = tokio::fs::DirBuilder::new();
    #[cfg(unix)]
    builder.mode(OUTPUT_DIR_MODE);
    builder
        .create(path)
        .await
        .map_err(|source| StorageError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "output directory created");
    Ok(true)
}

/// Appends `content` plus a trailing newline to `path`, creating the file if needed.
///
/// # Errors
///
/// Returns `StorageError::Write` when the file cannot be opened or written.
pub async fn append_text(path: &Path, content: &str) -> Result<(), StorageError> {
    use tokio::io::AsyncWriteExt;

    let map_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = tokio::fs::OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(CACHE_FILE_MODE);

    let mut file = options.open(path).await.map_err(map_err)?;
    file.write_all(content.as_bytes()).await.map_err(map_err)?;
    file.write_all(b"\n").await.map_err(map_err)?;
    file.flush().await.map_err(map_err)
}

/// Reads a whole text file. Invalid UTF-8 is replaced lossily.
///
/// # Errors
///
/// Returns `StorageError::Read` when the file cannot be read.
pub async fn read_text(path: &Path) -> Result<String, StorageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
