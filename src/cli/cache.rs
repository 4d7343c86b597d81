//! Build a flattened asset cache for a markup document.
//!
//! This is the single operation the binary exposes. It reads the document,
//! copies every referenced asset into the cache directory under a
//! collision-free flattened name and writes a `transformed_` copy of the
//! document whose references point at the flattened files.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::cache::{AssetCache, MaterializeOptions};
use crate::constants::DEFAULT_CACHE_DIR;
use crate::utils::progress::ProgressBar;

/// Build the asset cache for one document.
///
/// # Examples
///
/// ```bash
/// # Flatten every reference into ./asset_cache/<document stem>/
/// assetcache scene.xml
///
/// # Resolve references against a search directory and keep one level
/// # of parent directories in the flattened names
/// assetcache scene.xml --asset-dir /data/assets --depth 1
/// ```
#[derive(Args, Debug)]
pub struct CacheCommand {
    /// Path to the document whose referenced assets should be cached
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Root directory for the asset cache
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Directory to resolve relative references against (also stripped as a
    /// prefix before flattening)
    #[arg(long, value_name = "DIR")]
    asset_dir: Option<PathBuf>,

    /// Number of directory levels to keep in flattened names (omit to
    /// flatten fully)
    #[arg(long, value_name = "N")]
    depth: Option<usize>,

    /// Maximum number of assets copied concurrently
    #[arg(long, value_name = "NUM")]
    max_parallel: Option<usize>,

    /// Reference to exclude from flattening, repeatable
    #[arg(long, value_name = "REFERENCE")]
    keep: Vec<String>,
}

impl CacheCommand {
    /// Run the cache pipeline and print a summary of what was copied.
    pub async fn execute(self, no_progress: bool) -> Result<()> {
        println!("📦 Building asset cache for {}", self.document.display());

        let progress = if no_progress {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        progress.set_prefix("📦");

        let options = MaterializeOptions {
            asset_dir: self.asset_dir,
            depth: self.depth,
            keep: self.keep,
            max_parallel: self.max_parallel,
        };

        let cache = AssetCache::new(&self.cache_dir);
        let result = cache
            .process_document_with_progress(&self.document, &options, &progress)
            .await;
        // Clear the spinner before printing anything, including errors.
        progress.finish_and_clear();
        let report = result?;

        println!(
            "  Copied {} assets into {}",
            report.copied(),
            cache.output_dir(&self.document)?.display()
        );
        if report.missing() > 0 {
            println!(
                "  {}",
                format!(
                    "{} references could not be resolved and were left unchanged",
                    report.missing()
                )
                .yellow()
            );
        }
        println!(
            "  Transformed document: {}",
            report.transformed_path.display()
        );

        println!("\n{}", "✅ Asset cache ready".green().bold());
        Ok(())
    }
}
