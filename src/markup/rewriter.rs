//! Rewriting of `file` attribute values in scene documents.
//!
//! Produces a copy of a document with each `file` attribute value replaced
//! according to a mapping. The rewrite is a streaming event copy: elements
//! whose `file` value is not in the mapping (or maps to itself) pass through
//! verbatim, as do text, comments, declarations, and processing instructions.
//! Only elements that actually change are re-serialized, so the output differs
//! from the input in attribute values and nothing else that matters.
//!
//! Replacement values are entity-escaped on output, so a mapped name
//! containing `&` or `<` still yields a well-formed document.

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::HashMap;

use super::{FILE_ATTR, Nesting};

/// Rewrite `file` attribute values according to `mapping`.
///
/// References absent from the mapping keep their original value, so an empty
/// mapping returns an equivalent document. Attribute order and all other
/// attributes are preserved on rewritten elements.
///
/// # Errors
///
/// Returns an error if the document is malformed (same rules as
/// [`extract_file_references`](super::extract_file_references)).
///
/// # Examples
///
/// ```rust
/// use assetcache_cli::markup::rewriter::rewrite_file_references;
/// use std::collections::HashMap;
///
/// # fn example() -> anyhow::Result<()> {
/// let doc = r#"<scene><mesh name="hand" file="models/hand.stl"/></scene>"#;
/// let mut mapping = HashMap::new();
/// mapping.insert("models/hand.stl".to_string(), "models_hand.stl".to_string());
///
/// let rewritten = rewrite_file_references(doc, &mapping)?;
/// assert!(rewritten.contains(r#"file="models_hand.stl""#));
/// assert!(rewritten.contains(r#"name="hand""#));
/// # Ok(())
/// # }
/// ```
pub fn rewrite_file_references(
    content: &str,
    mapping: &HashMap<String, String>,
) -> Result<String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().check_end_names = true;
    let mut writer = Writer::new(Vec::new());
    let mut nesting = Nesting::default();

    loop {
        match reader.read_event() {
            Err(e) => bail!("malformed markup at byte {}: {e}", reader.buffer_position()),
            Ok(Event::Eof) => {
                nesting.finish()?;
                break;
            }
            Ok(Event::Start(element)) => {
                nesting.start()?;
                match remap_element(&element, mapping)? {
                    Some(rebuilt) => writer.write_event(Event::Start(rebuilt))?,
                    None => writer.write_event(Event::Start(element))?,
                }
            }
            Ok(Event::Empty(element)) => {
                nesting.empty()?;
                match remap_element(&element, mapping)? {
                    Some(rebuilt) => writer.write_event(Event::Empty(rebuilt))?,
                    None => writer.write_event(Event::Empty(element))?,
                }
            }
            Ok(Event::End(element)) => {
                nesting.end()?;
                writer.write_event(Event::End(element))?;
            }
            Ok(Event::Text(text)) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    nesting.content()?;
                }
                writer.write_event(Event::Text(text))?;
            }
            Ok(Event::CData(data)) => {
                nesting.content()?;
                writer.write_event(Event::CData(data))?;
            }
            Ok(event) => writer.write_event(event)?,
        }
    }

    String::from_utf8(writer.into_inner()).context("rewritten document is not valid UTF-8")
}

/// Rebuild the element with its `file` attribute remapped.
///
/// Returns `None` when the element has no `file` attribute, the value is not
/// in the mapping, or the mapping is an identity, so the caller can write the
/// original event through untouched.
fn remap_element(
    element: &BytesStart<'_>,
    mapping: &HashMap<String, String>,
) -> Result<Option<BytesStart<'static>>> {
    let mut replacement: Option<String> = None;
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| anyhow!("malformed attribute: {e}"))?;
        if attribute.key.as_ref() == FILE_ATTR.as_bytes() {
            let value = attribute
                .unescape_value()
                .map_err(|e| anyhow!("invalid attribute value: {e}"))?;
            if let Some(mapped) = mapping.get(value.as_ref())
                && mapped.as_str() != value.as_ref()
            {
                replacement = Some(mapped.clone());
            }
            break;
        }
    }
    let Some(replacement) = replacement else {
        return Ok(None);
    };

    let element_name = element.name();
    let name = std::str::from_utf8(element_name.as_ref())
        .context("element name is not valid UTF-8")?;
    let mut rebuilt = BytesStart::new(name.to_string());
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| anyhow!("malformed attribute: {e}"))?;
        if attribute.key.as_ref() == FILE_ATTR.as_bytes() {
            rebuilt.push_attribute((FILE_ATTR, replacement.as_str()));
        } else {
            rebuilt.push_attribute(attribute);
        }
    }
    Ok(Some(rebuilt))
}
