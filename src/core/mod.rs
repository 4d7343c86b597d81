//! Core types shared across the asset cache tool.
//!
//! This module holds the foundation the rest of the crate is built on: the error
//! type system. The design follows two principles:
//!
//! - **Strongly-typed errors** ([`AssetCacheError`]) for precise handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for
//!   CLI users, rendered with terminal colors by [`user_friendly_error`]
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use assetcache_cli::core::{AssetCacheError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(AssetCacheError::DocumentNotFound {
//!         path: "scene.xml".to_string(),
//!     }
//!     .into())
//! }
//!
//! fn handle_operation() {
//!     match example_operation() {
//!         Ok(result) => println!("Success: {}", result),
//!         Err(e) => {
//!             let friendly = user_friendly_error(e);
//!             friendly.display(); // Shows colored error with suggestions
//!         }
//!     }
//! }
//! ```

pub mod error;

pub use error::{AssetCacheError, ErrorContext, user_friendly_error};
