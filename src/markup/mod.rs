//! Scene document parsing, reference extraction, and rewriting.
//!
//! Scene documents are XML-like markup where any element may carry a `file`
//! attribute naming an external asset:
//!
//! ```xml
//! <scene>
//!     <asset>
//!         <texture name="wood" file="textures/wood.png"/>
//!         <mesh name="hand" file="models/robot/hand.stl"/>
//!     </asset>
//! </scene>
//! ```
//!
//! Two operations are provided:
//!
//! - [`extract_file_references`]: collect every `file` attribute value in
//!   document order, duplicates included.
//! - [`rewrite_file_references`]: produce a copy of the document with `file`
//!   attribute values replaced according to a mapping, leaving everything
//!   else (element order, other attributes, text, comments) untouched.
//!
//! # Strictness
//!
//! Both operations reject malformed input rather than guessing: mismatched or
//! unclosed tags, documents with no root element (including empty input),
//! multiple root elements, and non-whitespace content outside the root are all
//! errors. A document that extracts cleanly will also rewrite cleanly.
//!
//! # Examples
//!
//! ```rust
//! use assetcache_cli::markup::{extract_file_references, rewrite_file_references};
//! use std::collections::HashMap;
//!
//! # fn example() -> anyhow::Result<()> {
//! let doc = r#"<scene><mesh file="models/hand.stl"/></scene>"#;
//!
//! let references = extract_file_references(doc)?;
//! assert_eq!(references, vec!["models/hand.stl".to_string()]);
//!
//! let mut mapping = HashMap::new();
//! mapping.insert("models/hand.stl".to_string(), "models_hand.stl".to_string());
//! let rewritten = rewrite_file_references(doc, &mapping)?;
//! assert!(rewritten.contains(r#"file="models_hand.stl""#));
//! # Ok(())
//! # }
//! ```

use anyhow::{Result, bail};

pub mod extractor;
pub mod rewriter;

pub use extractor::extract_file_references;
pub use rewriter::rewrite_file_references;

/// Attribute key that names an external asset.
pub(crate) const FILE_ATTR: &str = "file";

/// Structural checks the pull parser does not enforce on its own.
///
/// Tracks element nesting across a full event stream and rejects the shapes a
/// well-formed document cannot have: a second root element, content outside
/// the root, unclosed elements at end of input, and input with no root at all.
#[derive(Debug, Default)]
pub(crate) struct Nesting {
    depth: usize,
    root_seen: bool,
}

impl Nesting {
    /// Record an opening tag.
    pub(crate) fn start(&mut self) -> Result<()> {
        self.enter_root()?;
        self.depth += 1;
        Ok(())
    }

    /// Record a self-closing element.
    pub(crate) fn empty(&mut self) -> Result<()> {
        self.enter_root()
    }

    /// Record a closing tag.
    pub(crate) fn end(&mut self) -> Result<()> {
        if self.depth == 0 {
            bail!("closing tag with no matching opening tag");
        }
        self.depth -= 1;
        Ok(())
    }

    /// Record non-whitespace character data.
    pub(crate) fn content(&self) -> Result<()> {
        if self.depth == 0 {
            bail!("content outside of the root element");
        }
        Ok(())
    }

    /// Validate the state at end of input.
    pub(crate) fn finish(&self) -> Result<()> {
        if self.depth > 0 {
            bail!("unexpected end of document: {} unclosed element(s)", self.depth);
        }
        if !self.root_seen {
            bail!("document has no root element");
        }
        Ok(())
    }

    fn enter_root(&mut self) -> Result<()> {
        if self.depth == 0 {
            if self.root_seen {
                bail!("multiple root elements");
            }
            self.root_seen = true;
        }
        Ok(())
    }
}
