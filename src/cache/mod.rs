//! Asset cache construction.
//!
//! The [`materializer`] submodule holds the pipeline itself; [`AssetCache`]
//! is the thin entry point that picks a per-document output directory under
//! one cache root and delegates everything else.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetcache_cli::cache::{AssetCache, MaterializeOptions};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cache = AssetCache::new("./asset_cache");
//! let report = cache
//!     .process_document(Path::new("scene.xml"), &MaterializeOptions::new())
//!     .await?;
//! println!(
//!     "{} assets copied, {} missing, document at {}",
//!     report.copied(),
//!     report.missing(),
//!     report.transformed_path.display()
//! );
//! # Ok(())
//! # }
//! ```

use crate::constants::DEFAULT_CACHE_DIR;
use crate::utils::progress::ProgressBar;
use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub mod materializer;

pub use materializer::{
    AssetStatus, CacheEntry, MaterializeOptions, MaterializeReport, materialize_document,
};

/// A cache root under which each processed document gets its own directory.
///
/// Construction performs no I/O; directories are created during
/// materialization, after the document has parsed successfully. A document
/// `scenes/robot.xml` processed against a cache root `./asset_cache` writes
/// into `./asset_cache/robot/`.
#[derive(Debug, Clone)]
pub struct AssetCache {
    cache_dir: PathBuf,
}

impl AssetCache {
    /// Create a cache rooted at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self { cache_dir: cache_dir.into() }
    }

    /// The configured cache root.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// The output directory a document would materialize into.
    ///
    /// # Errors
    ///
    /// Fails when the document path has no usable file stem.
    pub fn output_dir(&self, document: &Path) -> Result<PathBuf> {
        let stem = document
            .file_stem()
            .and_then(OsStr::to_str)
            .with_context(|| format!("Document path has no file name: {}", document.display()))?;
        Ok(self.cache_dir.join(stem))
    }

    /// Materialize a document's asset cache without progress output.
    pub async fn process_document(
        &self,
        document: &Path,
        options: &MaterializeOptions,
    ) -> Result<MaterializeReport> {
        self.process_document_with_progress(document, options, &ProgressBar::hidden())
            .await
    }

    /// Materialize a document's asset cache, reporting progress on `progress`.
    pub async fn process_document_with_progress(
        &self,
        document: &Path,
        options: &MaterializeOptions,
        progress: &ProgressBar,
    ) -> Result<MaterializeReport> {
        let destination = self.output_dir(document)?;
        materialize_document(document, &destination, options, progress).await
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}
