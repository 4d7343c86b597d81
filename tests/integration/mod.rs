//! Integration test suite for the asset cache builder
//!
//! End-to-end tests that drive the compiled binary against real scene
//! workspaces laid out in temporary directories. These tests run quickly and
//! are executed in CI on every commit.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! Tests are organized by functionality area:
//! - **cache_build**: Full pipeline runs and cache directory layout
//! - **cli_surface**: Help, version, and argument validation
//! - **error_scenarios**: Malformed documents, missing files, exit codes
//! - **flatten_behavior**: Collision handling, --depth, --keep, --asset-dir

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

// Integration tests
mod cache_build;
mod cli_surface;
mod error_scenarios;
mod flatten_behavior;
