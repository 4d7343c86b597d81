//! Error handling for the asset cache tool.
//!
//! The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`AssetCacheError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Document parsing**: [`AssetCacheError::ParseError`], [`AssetCacheError::DocumentNotFound`]
//! - **File system**: [`AssetCacheError::FileSystemError`], [`AssetCacheError::PermissionDenied`],
//!   [`AssetCacheError::CopyFailed`], [`AssetCacheError::IoError`]
//!
//! A missing referenced asset is deliberately *not* an error: the pipeline records it,
//! warns, and keeps the original reference in the rewritten document. Likewise a
//! flattened-name conflict never surfaces here; the flattener resolves it internally.
//!
//! # Examples
//!
//! ```rust,no_run
//! use assetcache_cli::core::{AssetCacheError, ErrorContext, user_friendly_error};
//!
//! fn parse_scene() -> Result<(), AssetCacheError> {
//!     Err(AssetCacheError::ParseError {
//!         file: "scene.xml".to_string(),
//!         reason: "mismatched end tag".to_string(),
//!     })
//! }
//!
//! match parse_scene() {
//!     Ok(_) => println!("Success!"),
//!     Err(e) => {
//!         let ctx = user_friendly_error(anyhow::Error::from(e));
//!         ctx.display(); // Shows colored error with suggestions
//!     }
//! }
//! ```
//!
//! ## Creating Error Context Manually
//!
//! ```rust,no_run
//! use assetcache_cli::core::{AssetCacheError, ErrorContext};
//!
//! let error = AssetCacheError::DocumentNotFound {
//!     path: "scene.xml".to_string(),
//! };
//! let context = ErrorContext::new(error)
//!     .with_suggestion("Check the document path passed on the command line")
//!     .with_details("The positional argument must point to an existing markup document");
//!
//! // Display with colors in terminal
//! context.display();
//!
//! // Or get as string for logging
//! let message = format!("{}", context);
//! ```

use colored::Colorize;
use std::fmt;

/// The main error type for asset cache operations
///
/// Each variant represents a specific failure mode and carries enough context
/// (paths, references, reasons) for both programmatic handling and user display.
///
/// # Examples
///
/// ## Pattern Matching on Errors
///
/// ```rust,no_run
/// use assetcache_cli::core::AssetCacheError;
///
/// fn handle_error(error: AssetCacheError) {
///     match error {
///         AssetCacheError::ParseError { file, .. } => {
///             eprintln!("Document {} is not well-formed; nothing was written", file);
///         }
///         AssetCacheError::CopyFailed { reference, .. } => {
///             eprintln!("Copy of '{}' failed; earlier copies are left in place", reference);
///         }
///         _ => {
///             eprintln!("Unexpected error: {}", error);
///         }
///     }
/// }
/// ```
// Display, Error and From are implemented by hand below instead of through
// thiserror: the derive reserves any field named `source` for the error cause,
// but `CopyFailed.source` is the resolved source *path* (a String), which
// cannot implement std::error::Error.
#[derive(Debug)]
pub enum AssetCacheError {
    /// Input document is not well-formed markup
    ///
    /// Extraction is strict: syntax errors, mismatched or unclosed tags, a missing
    /// root element, or trailing content all reject the document. This error is
    /// raised before anything is written to the cache directory.
    ///
    /// # Fields
    /// - `file`: The document that failed to parse (or "<input>" for raw text)
    /// - `reason`: The parser's description of the failure
    ///
    /// Displays as `Failed to parse document '{file}': {reason}`.
    ParseError {
        /// The document that failed to parse
        file: String,
        /// The parser's description of the failure
        reason: String,
    },

    /// Input document file does not exist
    ///
    /// Displays as `Document not found: {path}`.
    DocumentNotFound {
        /// Path that was expected to contain the source document
        path: String,
    },

    /// Copying a referenced asset into the cache failed
    ///
    /// Raised for filesystem-level copy failures (permissions, disk full, invalid
    /// destination). A source file that simply does not exist is not a `CopyFailed`;
    /// that case is recoverable and only logged as a warning.
    ///
    /// # Fields
    /// - `reference`: The reference string as written in the document
    /// - `source`: The resolved source path the copy was attempted from
    /// - `reason`: The underlying failure
    ///
    /// Displays as `Failed to copy asset '{reference}' from {source}: {reason}`.
    CopyFailed {
        /// The reference string as written in the document
        reference: String,
        /// The resolved source path the copy was attempted from
        source: String,
        /// The underlying failure
        reason: String,
    },

    /// File system error
    ///
    /// Displays as `File system error: {operation}`.
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    ///
    /// Displays as `Permission denied: {operation}`.
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// IO error
    ///
    /// Displays as `IO error: {0}`; the wrapped error is exposed through
    /// [`std::error::Error::source`].
    IoError(std::io::Error),

    /// Other error
    ///
    /// Displays as `{message}`.
    Other {
        /// Generic error message
        message: String,
    },
}

impl fmt::Display for AssetCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError { file, reason } => {
                write!(f, "Failed to parse document '{file}': {reason}")
            }
            Self::DocumentNotFound { path } => write!(f, "Document not found: {path}"),
            Self::CopyFailed {
                reference,
                source,
                reason,
            } => write!(f, "Failed to copy asset '{reference}' from {source}: {reason}"),
            Self::FileSystemError { operation, .. } => write!(f, "File system error: {operation}"),
            Self::PermissionDenied { operation, .. } => write!(f, "Permission denied: {operation}"),
            Self::IoError(error) => write!(f, "IO error: {error}"),
            Self::Other { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for AssetCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetCacheError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

impl Clone for AssetCacheError {
    fn clone(&self) -> Self {
        match self {
            Self::ParseError {
                file,
                reason,
            } => Self::ParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::DocumentNotFound {
                path,
            } => Self::DocumentNotFound {
                path: path.clone(),
            },
            Self::CopyFailed {
                reference,
                source,
                reason,
            } => Self::CopyFailed {
                reference: reference.clone(),
                source: source.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            // io::Error does not implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps an [`AssetCacheError`] and adds optional suggestions for
/// resolution and additional details. This is the primary way errors are presented
/// to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use assetcache_cli::core::{AssetCacheError, ErrorContext};
///
/// let context = ErrorContext::new(AssetCacheError::DocumentNotFound {
///     path: "scene.xml".to_string(),
/// })
/// .with_suggestion("Check the document path for typos")
/// .with_details("The document is read before any cache directory is created");
///
/// context.display(); // Prints colored error to stderr
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AssetCacheError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from an [`AssetCacheError`]
    ///
    /// This creates a basic error context with no additional suggestions or details.
    /// Use [`with_suggestion`] and [`with_details`] to add user-facing information.
    ///
    /// [`with_suggestion`]: ErrorContext::with_suggestion
    /// [`with_details`]: ErrorContext::with_details
    #[must_use]
    pub const fn new(error: AssetCacheError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps that users can take to resolve
    /// the error. They are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred or what it means.
    /// They are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Create an [`ErrorContext`] with only a suggestion (no specific error)
    pub fn suggestion(suggestion: impl Into<String>) -> Self {
        Self {
            error: AssetCacheError::Other {
                message: String::new(),
            },
            suggestion: Some(suggestion.into()),
            details: None,
        }
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// Prints the error, details, and suggestion to stderr using color coding:
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the main entry point for converting arbitrary errors into
/// user-friendly error messages for CLI display. It recognizes [`AssetCacheError`]
/// variants and common [`std::io::Error`] kinds and provides appropriate context;
/// everything else falls through to a generic rendering that includes the full
/// error chain.
///
/// # Examples
///
/// ```rust,no_run
/// use assetcache_cli::core::{AssetCacheError, user_friendly_error};
///
/// let error = AssetCacheError::ParseError {
///     file: "scene.xml".to_string(),
///     reason: "unexpected end of document".to_string(),
/// };
/// let context = user_friendly_error(anyhow::Error::from(error));
///
/// context.display(); // Shows parse-specific suggestions
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Check for specific error types and provide helpful suggestions
    if let Some(cache_error) = error.downcast_ref::<AssetCacheError>() {
        return create_error_context(cache_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AssetCacheError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check ownership of the cache directory and the referenced assets, or choose a different --cache-dir")
                .with_details("This error occurs when the tool doesn't have permission to read an asset or write into the cache directory");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AssetCacheError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(
                    "This error occurs when a required file or directory cannot be found",
                );
            }
            std::io::ErrorKind::StorageFull => {
                return ErrorContext::new(AssetCacheError::FileSystemError {
                    operation: "file copy".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Free disk space or point --cache-dir at a volume with room for the copied assets")
                .with_details("Files copied before the failure are left in place; the run is not rolled back");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    // Append error chain if available
    let chain: Vec<String> = error
        .chain()
        .skip(1) // Skip the root cause which is already in to_string()
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AssetCacheError::Other {
        message,
    })
}

/// Create appropriate [`ErrorContext`] with suggestions for specific errors
///
/// Maps each [`AssetCacheError`] variant to tailored suggestions and details.
/// Used by [`user_friendly_error`] to keep error messages consistent.
fn create_error_context(error: AssetCacheError) -> ErrorContext {
    match &error {
        AssetCacheError::ParseError { file, reason } => {
            ErrorContext::new(AssetCacheError::ParseError {
                file: file.clone(),
                reason: reason.clone(),
            })
            .with_suggestion(format!(
                "Check that {file} is well-formed markup: every tag closed, a single root element, no trailing content"
            ))
            .with_details("Parsing is strict by design; nothing is written to the cache directory when the document is rejected")
        }

        AssetCacheError::DocumentNotFound { path } => {
            ErrorContext::new(AssetCacheError::DocumentNotFound {
                path: path.clone(),
            })
            .with_suggestion(format!("Verify the path '{path}' exists and is readable"))
            .with_details("The positional argument must point to the markup document whose assets should be cached")
        }

        AssetCacheError::CopyFailed { reference, source, reason } => {
            ErrorContext::new(AssetCacheError::CopyFailed {
                reference: reference.clone(),
                source: source.clone(),
                reason: reason.clone(),
            })
            .with_suggestion("Check that the source file is readable and the cache directory is writable")
            .with_details(format!(
                "Copy failed: {reason}. Assets copied before the failure are left in place"
            ))
        }

        AssetCacheError::PermissionDenied { operation, path } => {
            ErrorContext::new(AssetCacheError::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            })
            .with_suggestion(match cfg!(windows) {
                true => "Run as Administrator or check file permissions in File Explorer",
                false => "Use 'sudo' or check file permissions with 'ls -la'",
            })
            .with_details(format!(
                "Cannot {operation} due to insufficient permissions on {path}"
            ))
        }

        _ => ErrorContext::new(error.clone()),
    }
}
