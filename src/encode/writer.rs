//! Request document writer
//!
//! Layout of a rendered request:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Root xmlns="...">
//!     <A>1</A>
//!     <B>
//!         <C>x</C>
//!     </B>
//! </Root>
//! ```
//!
//! Elements are written in tag order at four spaces per nesting level.
//! `Null` values are omitted entirely.

use super::types::{EncoderConfig, ListLayout, XmlFields, XmlValue};
use crate::error::{Error, Result};
use chrono::SecondsFormat;
use quick_xml::escape::partial_escape;
use tracing::trace;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "    ";

/// Render a request document
///
/// The result is fully determined by `root`, `config` and the contents of
/// `fields`; insertion order never matters.
pub fn encode(root: &str, config: &EncoderConfig, fields: &XmlFields) -> Result<String> {
    validate_tag(root)?;
    let body = write_elements(config, fields, 1)?;

    let mut xml = String::with_capacity(body.len() + 128);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push('<');
    xml.push_str(root);
    xml.push_str(" xmlns=\"");
    xml.push_str(config.namespace.uri());
    xml.push_str("\">\n");
    xml.push_str(&body);
    xml.push_str("\n</");
    xml.push_str(root);
    xml.push_str(">\n");

    trace!(root, bytes = xml.len(), "encoded request");
    Ok(xml)
}

/// Render the elements of one mapping, one per line, without a trailing newline
fn write_elements(config: &EncoderConfig, fields: &XmlFields, level: usize) -> Result<String> {
    let prefix = INDENT.repeat(level);
    let mut lines = Vec::with_capacity(fields.len());

    for (tag, value) in fields {
        if value.is_null() {
            continue;
        }
        validate_tag(tag)?;

        match value {
            XmlValue::List(items) => {
                let items: Vec<&XmlValue> = items.iter().filter(|v| !v.is_null()).collect();
                if items.iter().any(|v| matches!(v, XmlValue::List(_))) {
                    return Err(Error::encoding(tag, "a list cannot directly contain a list"));
                }

                let layout = if !items.is_empty() && items.iter().all(|v| v.is_scalar()) {
                    config.scalar_lists
                } else {
                    config.record_lists
                };

                match layout {
                    ListLayout::Repeated => {
                        for item in items {
                            let content = element_content(config, tag, item, level)?;
                            lines.push(element(&prefix, tag, &content));
                        }
                    }
                    ListLayout::Grouped => {
                        let content = grouped_content(config, tag, &items, level)?;
                        lines.push(element(&prefix, tag, &content));
                    }
                }
            }
            other => {
                let content = element_content(config, tag, other, level)?;
                lines.push(element(&prefix, tag, &content));
            }
        }
    }

    Ok(lines.join("\n"))
}

fn element(prefix: &str, tag: &str, content: &str) -> String {
    format!("{prefix}<{tag}>{content}</{tag}>")
}

/// Content between the start and end tag of a single (non-list) value
fn element_content(config: &EncoderConfig, tag: &str, value: &XmlValue, level: usize) -> Result<String> {
    match value {
        XmlValue::Map(children) => {
            let body = write_elements(config, children, level + 1)?;
            if body.is_empty() {
                Ok(String::new())
            } else {
                Ok(format!("\n{body}\n{}", INDENT.repeat(level)))
            }
        }
        XmlValue::List(_) => Err(Error::encoding(tag, "a list cannot directly contain a list")),
        scalar => scalar_text(config, tag, scalar),
    }
}

/// Content of a grouped list: scalar items are concatenated, mapping items
/// contribute their child elements in item order
fn grouped_content(
    config: &EncoderConfig,
    tag: &str,
    items: &[&XmlValue],
    level: usize,
) -> Result<String> {
    let mut blocks = Vec::with_capacity(items.len());
    let mut has_children = false;

    for item in items {
        match item {
            XmlValue::Map(children) => {
                let body = write_elements(config, children, level + 1)?;
                if !body.is_empty() {
                    has_children = true;
                    blocks.push(body);
                }
            }
            other => blocks.push(element_content(config, tag, other, level)?),
        }
    }

    if has_children {
        Ok(format!("\n{}\n{}", blocks.join("\n"), INDENT.repeat(level)))
    } else {
        Ok(blocks.concat())
    }
}

/// Render a scalar as element text
pub(crate) fn scalar_text(config: &EncoderConfig, tag: &str, value: &XmlValue) -> Result<String> {
    let text = match value {
        XmlValue::Text(s) => s.clone(),
        XmlValue::Integer(i) => i.to_string(),
        XmlValue::Decimal(d) => d.to_string(),
        XmlValue::Float(f) => {
            if !f.is_finite() {
                return Err(Error::encoding(tag, format!("{f} has no XML representation")));
            }
            format!("{f:?}")
        }
        XmlValue::Bool(b) => b.to_string(),
        XmlValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        XmlValue::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, false),
        XmlValue::NaiveDateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        XmlValue::Null => String::new(),
        XmlValue::Map(_) | XmlValue::List(_) => {
            return Err(Error::encoding(tag, "expected a scalar value"))
        }
    };

    if config.escape_text {
        Ok(partial_escape(text.as_str()).into_owned())
    } else {
        Ok(text)
    }
}

/// Element names must be plain XML names without a prefix
pub(crate) fn validate_tag(tag: &str) -> Result<()> {
    let mut chars = tag.chars();
    let Some(first) = chars.next() else {
        return Err(Error::encoding(tag, "element name is empty"));
    };
    if !(first.is_alphabetic() || first == '_') {
        return Err(Error::encoding(tag, "element name must start with a letter or '_'"));
    }
    if let Some(bad) = chars.find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))) {
        return Err(Error::encoding(tag, format!("invalid character '{bad}' in element name")));
    }
    Ok(())
}
