//! XML to tree conversion
//!
//! Turns an XML response document into the same tag-keyed
//! `serde_json::Value` shape the JSON endpoints produce, so one schema can
//! decode either format:
//!
//! - the root element wrapper is dropped
//! - namespace prefixes are stripped (local names only)
//! - an element holding only text becomes a string, an empty one `null`
//! - an element with children becomes an object in document order; text
//!   mixed in between the children is kept under [`TEXT_KEY`]
//! - repeated sibling tags collapse into an array
//! - attributes are ignored

use crate::error::{Error, Result};
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::fmt::Display;

/// Key holding the text of an element that also has child elements
pub const TEXT_KEY: &str = "$text";

/// Element nesting accepted before the document is rejected
pub const MAX_XML_DEPTH: usize = 128;

/// Parse an XML document into a tag-keyed tree
pub fn xml_to_tree(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);

    // Skip the declaration, comments and whitespace before the root
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(_) => return read_element(&mut reader, 1),
            Event::Empty(_) => return Ok(Value::Null),
            Event::Eof => return Err(Error::xml("document has no root element")),
            _ => {}
        }
    }
}

/// Read the content of the element whose start tag was just consumed,
/// through its matching end tag
fn read_element(reader: &mut Reader<&[u8]>, depth: usize) -> Result<Value> {
    if depth > MAX_XML_DEPTH {
        return Err(Error::DepthExceeded {
            limit: MAX_XML_DEPTH,
        });
    }

    let mut children = Map::new();
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = local_name(&e)?;
                let value = read_element(reader, depth + 1)?;
                insert_child(&mut children, name, value);
            }
            Event::Empty(e) => {
                let name = local_name(&e)?;
                insert_child(&mut children, name, Value::Null);
            }
            Event::Text(e) => {
                let decoded = e.decode().map_err(xml_error)?;
                let unescaped = quick_xml::escape::unescape(&decoded).map_err(xml_error)?;
                text.push_str(&unescaped);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref().map_err(xml_error)? {
                    text.push(ch);
                } else {
                    let entity = e.decode().map_err(xml_error)?;
                    let resolved = resolve_predefined_entity(&entity)
                        .ok_or_else(|| Error::xml(format!("unknown entity '&{entity};'")))?;
                    text.push_str(resolved);
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(Error::xml("unexpected end of document")),
            _ => {}
        }
    }

    let text = text.trim();
    if !children.is_empty() {
        if !text.is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        return Ok(Value::Object(children));
    }

    if text.is_empty() {
        Ok(Value::Null)
    } else {
        Ok(Value::String(text.to_string()))
    }
}

fn local_name(start: &BytesStart<'_>) -> Result<String> {
    let name = start.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(xml_error)
}

fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

fn xml_error(err: impl Display) -> Error {
    Error::xml(err.to_string())
}
