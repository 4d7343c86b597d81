//! Test utilities for the asset cache builder.
//!
//! This module provides helpers for writing tests: scene document fixtures
//! that lay out a document plus its referenced asset files in a directory,
//! and one-time logging initialization that cooperates with the test harness.
//!
//! # Example
//!
//! ```rust,no_run
//! use assetcache_cli::test_utils::SceneFixture;
//!
//! # fn example() -> anyhow::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let document = SceneFixture::basic().write_to(dir.path())?;
//! assert!(document.exists());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// This function initializes the tracing subscriber for tests, but only once
/// regardless of how many times it's called. It respects the `RUST_LOG`
/// environment variable if set, or uses the provided log level.
///
/// # Arguments
///
/// * `level` - Optional log level to use. If None, uses `RUST_LOG` environment variable
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        // Determine the filter to use
        let filter = if let Some(level) = level {
            // Use the provided level
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            // Use environment variable
            EnvFilter::from_default_env()
        } else {
            // No logging if neither is provided
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // Important: uses test-compatible writer
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Test fixture describing a scene document and the asset files it references.
///
/// `write_to` materializes the fixture in a directory: every path in `assets`
/// is created as a file whose content is its own reference string, then the
/// document itself is written. Tests use the content to verify which source
/// file a cache entry was copied from.
#[derive(Clone, Debug)]
pub struct SceneFixture {
    pub name: String,
    pub content: String,
    pub assets: Vec<String>,
}

impl SceneFixture {
    /// Scene with references spread across nested directories.
    pub fn basic() -> Self {
        Self {
            name: "scene.xml".to_string(),
            content: r#"
<scene>
    <asset>
        <mesh name="arm" file="meshes/arm.stl"/>
        <mesh name="claw" file="meshes/gripper/claw.stl"/>
        <texture name="wood" file="textures/wood.png"/>
    </asset>
    <body>
        <geom mesh="arm"/>
    </body>
</scene>
"#
            .trim()
            .to_string(),
            assets: vec![
                "meshes/arm.stl".to_string(),
                "meshes/gripper/claw.stl".to_string(),
                "textures/wood.png".to_string(),
            ],
        }
    }

    /// Scene whose references share an immediate parent directory, so their
    /// flattened names collide until an extra ancestor is pulled in.
    pub fn colliding() -> Self {
        Self {
            name: "collide.xml".to_string(),
            content: r#"
<scene>
    <asset>
        <texture name="left" file="left/x/detail.png"/>
        <texture name="right" file="right/x/detail.png"/>
    </asset>
</scene>
"#
            .trim()
            .to_string(),
            assets: vec![
                "left/x/detail.png".to_string(),
                "right/x/detail.png".to_string(),
            ],
        }
    }

    /// Scene referencing one asset that is never created on disk.
    pub fn with_missing() -> Self {
        Self {
            name: "partial.xml".to_string(),
            content: r#"
<scene>
    <asset>
        <mesh name="arm" file="meshes/arm.stl"/>
        <mesh name="ghost" file="meshes/ghost.stl"/>
    </asset>
</scene>
"#
            .trim()
            .to_string(),
            assets: vec!["meshes/arm.stl".to_string()],
        }
    }

    /// Document with an unclosed root element.
    pub fn malformed() -> Self {
        Self {
            name: "broken.xml".to_string(),
            content: r#"<scene><mesh name="arm" file="meshes/arm.stl"/>"#.to_string(),
            assets: vec!["meshes/arm.stl".to_string()],
        }
    }

    /// Write the document and its asset files into `dir`.
    ///
    /// Returns the path of the written document.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        for asset in &self.assets {
            let path = dir.join(asset);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, asset)?;
        }
        let document_path = dir.join(&self.name);
        fs::write(&document_path, &self.content)?;
        Ok(document_path)
    }
}
