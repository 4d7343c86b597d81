//! The materialization pipeline: extract, flatten, copy, rewrite.
//!
//! [`materialize_document`] runs the whole flow for one document. Phases run
//! strictly in order: the document is read and parsed first, so a malformed
//! document aborts before anything touches the filesystem; the destination
//! directory is only created once extraction has succeeded. Asset copies run
//! concurrently with bounded parallelism, and the rewrite phase waits for
//! every copy decision before producing the transformed document.
//!
//! A reference whose resolved source does not exist is not an error: it is
//! logged, recorded as [`AssetStatus::Missing`], and left untouched in the
//! rewritten document. Filesystem failures during the copy phase are fatal
//! and aggregated into a single error; files copied before the failure stay
//! in place.

use crate::constants::DEFAULT_MAX_PARALLEL;
use crate::core::AssetCacheError;
use crate::flatten::{FlattenPolicy, flatten_references};
use crate::markup::{extract_file_references, rewrite_file_references};
use crate::utils::fs::{copy_file, ensure_dir, safe_write};
use crate::utils::progress::ProgressBar;
use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Options governing one materialization run.
///
/// # Examples
///
/// ```rust
/// use assetcache_cli::cache::MaterializeOptions;
///
/// let options = MaterializeOptions::new()
///     .with_asset_dir("assets")
///     .with_depth(1)
///     .keep("shared/calibration.yaml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaterializeOptions {
    /// Base directory for resolving relative references; also stripped as a
    /// prefix when flattening names.
    pub asset_dir: Option<PathBuf>,
    /// Directory levels preserved in flattened names; unset means maximum
    /// flattening.
    pub depth: Option<usize>,
    /// References left untouched by the flattener.
    pub keep: Vec<String>,
    /// Concurrent copy limit; unset means [`DEFAULT_MAX_PARALLEL`].
    pub max_parallel: Option<usize>,
}

impl MaterializeOptions {
    /// Create options with all defaults: maximum flattening, references
    /// resolved against the document's directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset base directory.
    #[must_use]
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = Some(dir.into());
        self
    }

    /// Set the number of trailing directory levels to preserve.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Add a reference to the passthrough escape list.
    #[must_use]
    pub fn keep(mut self, reference: impl Into<String>) -> Self {
        self.keep.push(reference.into());
        self
    }

    /// Set the concurrent copy limit.
    #[must_use]
    pub fn with_max_parallel(mut self, limit: usize) -> Self {
        self.max_parallel = Some(limit);
        self
    }
}

/// Copy outcome for one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    /// The resolved source existed and was copied into the cache.
    Copied,
    /// The resolved source did not exist; the reference passes through.
    Missing,
}

/// Per-reference record produced by materialization.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The reference string as written in the document.
    pub reference: String,
    /// The filesystem location the reference resolved to.
    pub source: PathBuf,
    /// Where the copy was (or would have been) placed.
    pub destination: PathBuf,
    /// Whether the asset was copied or missing.
    pub status: AssetStatus,
}

/// Result of a successful materialization run.
#[derive(Debug, Clone)]
pub struct MaterializeReport {
    /// Path of the rewritten document inside the destination directory.
    pub transformed_path: PathBuf,
    /// The effective mapping used for rewriting: flattened names for copied
    /// assets, identity for missing ones.
    pub mapping: HashMap<String, String>,
    /// One entry per distinct reference, in document order.
    pub entries: Vec<CacheEntry>,
}

impl MaterializeReport {
    /// Number of references copied into the cache.
    #[must_use]
    pub fn copied(&self) -> usize {
        self.entries.iter().filter(|e| e.status == AssetStatus::Copied).count()
    }

    /// Number of references whose source was missing.
    #[must_use]
    pub fn missing(&self) -> usize {
        self.entries.iter().filter(|e| e.status == AssetStatus::Missing).count()
    }
}

/// One unit of work for the parallel copy phase.
struct CopyJob {
    index: usize,
    reference: String,
    source: PathBuf,
    destination: PathBuf,
}

/// Materialize the asset cache for `document` into `destination`.
///
/// Reads and parses the document, flattens every extracted reference, copies
/// resolvable assets into `destination`, and writes the rewritten document
/// as `destination/transformed_<filename>`. The returned report carries the
/// transformed document's path, the effective mapping, and one [`CacheEntry`]
/// per distinct reference.
///
/// `progress` receives phase messages and per-copy ticks; pass
/// [`ProgressBar::hidden`] when no terminal output is wanted.
///
/// # Errors
///
/// Returns [`AssetCacheError::DocumentNotFound`] when the document does not
/// exist and [`AssetCacheError::ParseError`] when it is not well-formed; both
/// abort before any filesystem write. Copy and directory-creation failures
/// are fatal and reported after the parallel phase drains, with files copied
/// before the failure left in place.
pub async fn materialize_document(
    document: &Path,
    destination: &Path,
    options: &MaterializeOptions,
    progress: &ProgressBar,
) -> Result<MaterializeReport> {
    let document_name = document
        .file_name()
        .and_then(OsStr::to_str)
        .with_context(|| format!("Document path has no file name: {}", document.display()))?;

    progress.set_message(format!("Parsing {document_name}"));

    let content = tokio::fs::read_to_string(document).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::Error::from(AssetCacheError::DocumentNotFound {
                path: document.display().to_string(),
            })
        } else {
            anyhow::Error::from(e)
                .context(format!("Failed to read document {}", document.display()))
        }
    })?;

    // Strict parse before any filesystem mutation. A rejected document leaves
    // no trace on disk.
    let references =
        extract_file_references(&content).map_err(|e| AssetCacheError::ParseError {
            file: document.display().to_string(),
            reason: e.to_string(),
        })?;
    debug!(
        "extracted {} file references from {}",
        references.len(),
        document.display()
    );

    ensure_dir(destination)?;

    let mapping = flatten_references(&references, &flatten_policy(options));
    debug!("flattened {} distinct references", mapping.len());

    let document_dir = document
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut seen = HashSet::new();
    let jobs: Vec<CopyJob> = references
        .iter()
        .filter(|r| seen.insert(r.as_str()))
        .enumerate()
        .map(|(index, reference)| {
            let name = mapping
                .get(reference)
                .cloned()
                .unwrap_or_else(|| reference.clone());
            CopyJob {
                index,
                reference: reference.clone(),
                source: resolve_source(reference, document_dir, options.asset_dir.as_deref()),
                // A flattened name can itself be absolute (depth exceeding an
                // absolute path's segments, or an absolute keep entry); join
                // it cache-relative so copies never land outside destination.
                destination: destination.join(name.trim_start_matches('/')),
            }
        })
        .collect();

    let entries = copy_assets(jobs, options, progress).await?;

    let mut effective = HashMap::with_capacity(entries.len());
    for entry in &entries {
        let value = match entry.status {
            AssetStatus::Copied => mapping
                .get(&entry.reference)
                .cloned()
                .unwrap_or_else(|| entry.reference.clone()),
            AssetStatus::Missing => entry.reference.clone(),
        };
        effective.insert(entry.reference.clone(), value);
    }

    progress.set_message("Rewriting document references");
    let rewritten =
        rewrite_file_references(&content, &effective).map_err(|e| AssetCacheError::ParseError {
            file: document.display().to_string(),
            reason: e.to_string(),
        })?;

    let transformed_path =
        destination.join(format!("{}{document_name}", crate::constants::TRANSFORMED_PREFIX));
    safe_write(&transformed_path, &rewritten)?;
    debug!("wrote transformed document to {}", transformed_path.display());

    Ok(MaterializeReport {
        transformed_path,
        mapping: effective,
        entries,
    })
}

/// Translate run options into the flattener's policy.
fn flatten_policy(options: &MaterializeOptions) -> FlattenPolicy {
    let mut policy = FlattenPolicy::new();
    if let Some(dir) = &options.asset_dir {
        let base = dir.to_string_lossy();
        let base = base.trim_end_matches('/');
        if !base.is_empty() {
            policy = policy.with_base_dir(base);
        }
    }
    if let Some(depth) = options.depth {
        policy = policy.with_depth(depth);
    }
    for reference in &options.keep {
        policy = policy.keep(reference.clone());
    }
    policy
}

/// Resolve a reference to its source location.
///
/// Rule-based, first match wins: an absolute reference is its own location;
/// otherwise the asset directory (when supplied) is the base; otherwise the
/// document's directory is. There is no existence-driven fallback to later
/// rules.
fn resolve_source(reference: &str, document_dir: &Path, asset_dir: Option<&Path>) -> PathBuf {
    let path = Path::new(reference);
    if path.is_absolute() {
        path.to_path_buf()
    } else if let Some(base) = asset_dir {
        base.join(reference)
    } else {
        document_dir.join(reference)
    }
}

/// Run the resolve-and-copy phase with bounded concurrency.
///
/// Each job decides Copied vs Missing independently; results are put back in
/// input order before returning. Copy failures are collected while the
/// stream drains and aggregated into one error.
async fn copy_assets(
    jobs: Vec<CopyJob>,
    options: &MaterializeOptions,
    progress: &ProgressBar,
) -> Result<Vec<CacheEntry>> {
    let total = jobs.len();
    let concurrency = options.max_parallel.unwrap_or(DEFAULT_MAX_PARALLEL).max(1);
    let completed = Arc::new(Mutex::new(0usize));

    let results: Vec<(usize, Result<CacheEntry, AssetCacheError>)> = stream::iter(jobs)
        .map(|job| {
            let progress = progress.clone();
            let completed = Arc::clone(&completed);
            async move {
                let outcome = copy_one(&job).await;
                if let Ok(mut done) = completed.lock() {
                    *done += 1;
                    progress.set_message(format!("Copying assets ({done}/{total})"));
                }
                progress.inc(1);
                (job.index, outcome)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    let mut entries = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for (index, outcome) in results {
        match outcome {
            Ok(entry) => entries.push((index, entry)),
            Err(e) => failures.push(e.to_string()),
        }
    }

    if !failures.is_empty() {
        failures.sort();
        return Err(anyhow!(
            "Failed to copy {} assets:\n  {}",
            failures.len(),
            failures.join("\n  ")
        ));
    }

    entries.sort_by_key(|(index, _)| *index);
    Ok(entries.into_iter().map(|(_, entry)| entry).collect())
}

/// Copy a single asset, deciding Copied vs Missing for its entry.
async fn copy_one(job: &CopyJob) -> Result<CacheEntry, AssetCacheError> {
    let exists = tokio::fs::try_exists(&job.source).await.unwrap_or(false);
    if !exists {
        warn!(
            "asset '{}' not found at {}; keeping original reference",
            job.reference,
            job.source.display()
        );
        return Ok(CacheEntry {
            reference: job.reference.clone(),
            source: job.source.clone(),
            destination: job.destination.clone(),
            status: AssetStatus::Missing,
        });
    }

    copy_file(&job.source, &job.destination).await.map_err(|e| {
        AssetCacheError::CopyFailed {
            reference: job.reference.clone(),
            source: job.source.display().to_string(),
            reason: format!("{e:#}"),
        }
    })?;

    Ok(CacheEntry {
        reference: job.reference.clone(),
        source: job.source.clone(),
        destination: job.destination.clone(),
        status: AssetStatus::Copied,
    })
}
