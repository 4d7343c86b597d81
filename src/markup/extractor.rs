//! File reference extraction from scene documents.
//!
//! Scans a document for elements carrying a `file` attribute and returns the
//! attribute values in document order. The scan is a single streaming pass, so
//! large documents are handled without building a tree.
//!
//! # Extraction Rules
//!
//! - Every element is considered, at any nesting depth.
//! - Only the `file` attribute is extracted; other attributes are ignored.
//! - Values are entity-decoded (`&amp;` becomes `&`).
//! - A reference used by several elements appears once per element; nothing
//!   is deduplicated.
//!
//! # Usage
//!
//! ```rust
//! use assetcache_cli::markup::extractor::extract_file_references;
//!
//! # fn example() -> anyhow::Result<()> {
//! let doc = r#"
//! <scene>
//!     <texture file="textures/wood.png"/>
//!     <mesh file="models/hand.stl"/>
//! </scene>
//! "#;
//!
//! let references = extract_file_references(doc)?;
//! assert_eq!(references, vec!["textures/wood.png", "models/hand.stl"]);
//! # Ok(())
//! # }
//! ```

use anyhow::{Result, anyhow, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{FILE_ATTR, Nesting};

/// Extract all `file` attribute values from a scene document.
///
/// References are returned in document order, one per element that carries the
/// attribute, duplicates included. An element without a `file` attribute
/// contributes nothing; an element is never skipped for being deeply nested.
///
/// # Errors
///
/// Returns an error if the document is malformed: mismatched or unclosed tags,
/// no root element (including empty input), multiple root elements, content
/// outside the root, or an attribute that cannot be decoded.
///
/// # Examples
///
/// ```rust
/// # use assetcache_cli::markup::extractor::extract_file_references;
/// # fn example() -> anyhow::Result<()> {
/// let doc = r#"<scene><mesh file="a/b.stl"/><mesh file="a/b.stl"/></scene>"#;
/// let references = extract_file_references(doc)?;
/// assert_eq!(references, vec!["a/b.stl", "a/b.stl"]);
/// # Ok(())
/// # }
/// ```
pub fn extract_file_references(content: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().check_end_names = true;
    let mut nesting = Nesting::default();
    let mut references = Vec::new();

    loop {
        match reader.read_event() {
            Err(e) => bail!("malformed markup at byte {}: {e}", reader.buffer_position()),
            Ok(Event::Eof) => {
                nesting.finish()?;
                break;
            }
            Ok(Event::Start(element)) => {
                nesting.start()?;
                collect_reference(&element, &mut references)?;
            }
            Ok(Event::Empty(element)) => {
                nesting.empty()?;
                collect_reference(&element, &mut references)?;
            }
            Ok(Event::End(_)) => nesting.end()?,
            Ok(Event::Text(text)) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    nesting.content()?;
                }
            }
            Ok(Event::CData(_)) => nesting.content()?,
            // Declarations, comments, and processing instructions carry no references
            Ok(_) => {}
        }
    }

    Ok(references)
}

/// Append the element's `file` attribute value, if present.
fn collect_reference(element: &BytesStart<'_>, references: &mut Vec<String>) -> Result<()> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| anyhow!("malformed attribute: {e}"))?;
        if attribute.key.as_ref() == FILE_ATTR.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|e| anyhow!("invalid attribute value: {e}"))?;
            references.push(value.into_owned());
        }
    }
    Ok(())
}
