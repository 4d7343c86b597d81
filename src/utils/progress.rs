//! Progress indicators for cache operations.
//!
//! Wraps the `indicatif` crate with consistent styling and a single kill
//! switch for scripts and CI. Bars are used for asset copies (known count),
//! spinners for document parsing (indeterminate).
//!
//! # Environment Variables
//!
//! - `ASSETCACHE_NO_PROGRESS`: set to any value to disable all progress
//!   indicators
//!
//! # Examples
//!
//! ```rust
//! use assetcache_cli::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new(24);
//! progress.set_message("Copying assets");
//!
//! for _ in 0..24 {
//!     // copy one asset
//!     progress.inc(1);
//! }
//!
//! progress.finish_with_message("✅ Assets copied");
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Checks if progress bars should be disabled.
///
/// Progress bars are disabled when the `ASSETCACHE_NO_PROGRESS` environment
/// variable is set to any value.
fn is_progress_disabled() -> bool {
    std::env::var("ASSETCACHE_NO_PROGRESS").is_ok()
}

/// A progress bar with consistent styling across cache operations.
///
/// Wraps `indicatif`'s progress bar and respects the `ASSETCACHE_NO_PROGRESS`
/// environment variable. Hidden bars silently ignore all operations, so
/// callers never need to branch on whether progress output is enabled.
///
/// The underlying bar is internally reference counted; cloning is cheap and
/// clones update the same display, which is how the parallel copy phase
/// shares one bar across tasks.
///
/// # Examples
///
/// ```rust
/// use assetcache_cli::utils::progress::ProgressBar;
///
/// let progress = ProgressBar::new(50);
/// progress.set_prefix("📦");
/// progress.set_message("Copying assets");
///
/// for _ in 0..50 {
///     progress.inc(1);
/// }
///
/// progress.finish_with_message("✅ Cache built");
/// ```
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a progress bar tracking `len` units of work.
    ///
    /// Returns a hidden bar when progress output is disabled.
    pub fn new(len: u64) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new(len);
            bar.set_style(default_style());
            bar
        };
        Self { inner: bar }
    }

    /// Creates a spinner for operations without a known unit count.
    ///
    /// The spinner animates every 100ms until finished. Returns a hidden
    /// bar when progress output is disabled.
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { inner: bar }
    }

    /// Creates a progress bar that never draws.
    ///
    /// Used by library callers and the `--no-progress` flag; every operation
    /// on a hidden bar is a no-op.
    pub fn hidden() -> Self {
        Self { inner: IndicatifBar::hidden() }
    }

    /// Sets the message displayed alongside the progress bar.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Sets the prefix displayed before the progress bar.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Increments the progress bar by `delta` units.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Sets the absolute progress position.
    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    /// Finishes the progress bar, replacing it with a completion message.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Finishes the progress bar and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

/// Pre-configured styles for cache progress indicators.
pub struct ProgressStyle;

impl ProgressStyle {
    /// The default bar style: prefix, 40-char cyan/blue bar, position and ETA.
    pub fn default_style() -> IndicatifStyle {
        default_style()
    }

    /// The spinner style used during document parsing.
    pub fn spinner() -> IndicatifStyle {
        spinner_style()
    }
}

fn default_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap()
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold} {spinner:.cyan} {msg}")
        .unwrap()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
