//! File system and user interface utilities.
//!
//! This module provides the helpers the cache pipeline builds on: atomic
//! file writes, asset copying, and progress indicators for long-running
//! operations.
//!
//! # Modules
//!
//! - [`fs`] - File system operations with atomic writes and safe copying
//! - [`progress`] - Progress bars and spinners for long-running operations
//!
//! # Example
//!
//! ```rust,no_run
//! use assetcache_cli::utils::{ensure_dir, safe_write, ProgressBar};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! // Ensure the cache directory exists
//! ensure_dir(Path::new("asset_cache/scene"))?;
//!
//! // Write the rewritten document atomically
//! safe_write(Path::new("asset_cache/scene/transformed_scene.xml"), "<scene/>")?;
//!
//! // Show progress
//! let progress = ProgressBar::new(100);
//! progress.set_message("Copying assets...");
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, copy_file, ensure_dir, safe_write};
pub use progress::{ProgressBar, ProgressStyle};
