//! Command-line interface for the asset cache builder.
//!
//! The binary exposes a single operation: take a markup document, copy every
//! asset it references into a flattened cache directory and write a
//! transformed copy of the document pointing at the cached files.
//!
//! ```bash
//! assetcache scene.xml
//! assetcache scene.xml --cache-dir /tmp/cache --asset-dir /data/assets
//! assetcache scene.xml --depth 1 --keep meshes/base.stl
//! ```
//!
//! Global flags control output: `--verbose` raises the log level to `debug`,
//! `--quiet` silences logging entirely and `--no-progress` disables the
//! progress spinner. `RUST_LOG` overrides the flag-derived log level when set.

pub mod cache;

pub use cache::CacheCommand;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level passed to the tracing subscriber, `None` silences logging
    pub log_level: Option<String>,
    /// Disable progress indicators
    pub no_progress: bool,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Flatten a document's file references into a collision-free asset cache.
#[derive(Parser, Debug)]
#[command(name = "assetcache", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    command: CacheCommand,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable the progress spinner (also honored via ASSETCACHE_NO_PROGRESS)
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    /// Execute the parsed command with configuration derived from the flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Execute with an explicit configuration, used by tests to bypass
    /// flag handling.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        init_logging(&config);
        self.command.execute(config.no_progress).await
    }

    fn build_config(&self) -> CliConfig {
        let mut config = CliConfig::new();
        if self.verbose {
            config.log_level = Some("debug".to_string());
        } else if self.quiet {
            config.log_level = None;
        } else {
            config.log_level = Some("info".to_string());
        }
        config.no_progress = self.no_progress;
        config
    }
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence over the
/// flag-derived level; a `None` level leaves logging uninitialized.
fn init_logging(config: &CliConfig) {
    let filter = if let Ok(filter) = EnvFilter::try_from_default_env() {
        filter
    } else if let Some(level) = &config.log_level {
        EnvFilter::new(level)
    } else {
        return;
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
