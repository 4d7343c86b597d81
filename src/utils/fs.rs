//! File system utilities for cache materialization.
//!
//! This module provides the small set of file operations the cache pipeline
//! needs: directory creation, atomic text writes for rewritten documents, and
//! asset copying. Writes are atomic (write-then-rename) so a crash mid-write
//! never leaves a truncated document behind.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetcache_cli::utils::fs::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("asset_cache/scene"))?;
//! safe_write(Path::new("asset_cache/scene/transformed_scene.xml"), "<scene/>")?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Returns an error if the path exists but is not a directory.
///
/// # Examples
///
/// ```rust,no_run
/// use assetcache_cli::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("asset_cache/scene/nested"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`] for text content. The file
/// either contains the new content or the old content, never a partial write.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// The content is written to a sibling `.tmp` file, synced to disk, then
/// renamed over the target path. Parent directories are created as needed.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written, synced,
/// or renamed into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Copies a single file, creating the destination's parent directories.
///
/// Used for asset copies where the flattened name may still contain directory
/// separators (depth-preserving mode). File contents and permission bits are
/// carried over; timestamps are not.
///
/// # Errors
///
/// Returns an error if the source cannot be read or the destination cannot be
/// written.
pub async fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    tokio::fs::copy(src, dst).await.with_context(|| {
        format!("Failed to copy file from {} to {}", src.display(), dst.display())
    })?;

    Ok(())
}
