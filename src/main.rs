//! Asset cache CLI entry point
//!
//! This is the main executable for the asset cache builder. It handles
//! command-line argument parsing, error display and command execution.
//!
//! The tool takes a markup document, copies every asset it references into a
//! flattened cache directory and writes a transformed copy of the document
//! whose references point at the cached files.

use anyhow::Result;
use assetcache_cli::cli;
use assetcache_cli::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
