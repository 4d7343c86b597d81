//! Global constants used throughout the asset cache codebase.
//!
//! Defaults shared between the CLI surface and the library API live here so
//! the two cannot drift apart.

/// Default root directory for the flattened asset cache.
///
/// The CLI's `--cache-dir` flag and [`crate::cache::AssetCache::default`]
/// both start from this value. Each processed document gets its own
/// subdirectory underneath, named after the document's stem.
pub const DEFAULT_CACHE_DIR: &str = "./asset_cache";

/// Filename prefix for the rewritten document placed inside the cache.
///
/// A document `scene.xml` produces `transformed_scene.xml` next to its
/// copied assets.
pub const TRANSFORMED_PREFIX: &str = "transformed_";

/// Default number of concurrent asset copies.
///
/// Copies are filesystem bound; a small fixed bound keeps disk contention
/// reasonable without tuning. Overridable with `--max-parallel`.
pub const DEFAULT_MAX_PARALLEL: usize = 8;
