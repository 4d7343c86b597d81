//! Asset cache builder for markup documents.
//!
//! Scene-style markup documents reference external assets through `file`
//! attributes scattered across nested directory trees. This crate copies
//! every referenced asset into a single cache directory, renames entries so
//! no two collide and rewrites the document to point at the cached copies.
//! The result is a self-contained directory that can be shipped or mounted
//! as a unit.
//!
//! # Pipeline
//!
//! Processing a document runs through four stages:
//!
//! 1. **Extraction** - scan the document for `file="..."` references
//!    ([`markup::extract_file_references`])
//! 2. **Flattening** - map every reference to a collision-free flat name,
//!    preserving as many trailing directory levels as requested ([`flatten`])
//! 3. **Copying** - copy the resolved source files into the cache
//!    concurrently ([`cache::materialize_document`])
//! 4. **Rewriting** - write `transformed_<name>` next to the cached assets
//!    with every reference replaced by its flattened name
//!    ([`markup::rewrite_file_references`])
//!
//! Missing assets are logged and their references passed through unchanged,
//! so a partially available scene still materializes.
//!
//! # Core Modules
//!
//! - [`cache`] - cache layout and the materialization pipeline
//! - [`cli`] - command-line interface
//! - [`core`] - error types and user-facing error formatting
//! - [`flatten`] - collision-free reference flattening
//! - [`markup`] - document reference extraction and rewriting
//! - [`utils`] - file system helpers and progress reporting
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Flatten every reference into ./asset_cache/<document stem>/
//! assetcache scene.xml
//!
//! # Resolve references against a search directory, keep one directory level
//! assetcache scene.xml --asset-dir /data/assets --depth 1
//!
//! # Leave specific references untouched
//! assetcache scene.xml --keep meshes/base.stl
//! ```

// Core functionality modules
pub mod cache;
pub mod cli;
pub mod constants;
pub mod core;
pub mod flatten;
pub mod markup;

// Supporting modules
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
