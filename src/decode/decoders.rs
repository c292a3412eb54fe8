//! Decoder implementations
//!
//! Decoding is payload-driven: every key of an object is visited in payload
//! order and converted with the decoder its schema declares for it, or
//! passed through raw when the schema says nothing about it.

use super::types::{describe, Decoded, FieldDecoder, FieldValue, Payload, Record, RecordList, Schema, SchemaKind};
use super::xml::xml_to_tree;
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::trace;

/// Maximum schema nesting followed before decoding gives up
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// Entry points
// ============================================================================

/// Decode a payload against a schema
pub fn decode(schema: &Schema, payload: Payload<'_>) -> Result<Decoded> {
    let (raw, raw_content) = load(payload)?;
    trace!(schema = schema.name(), "decoding payload");
    decode_value(schema, raw, raw_content, 0)
}

/// Decode a payload that must produce a single record
pub fn decode_record(schema: &Schema, payload: Payload<'_>) -> Result<Record> {
    if schema.is_list() {
        return Err(Error::schema_mismatch(schema.name(), "a record schema", "a list schema"));
    }
    let (raw, raw_content) = load(payload)?;
    build_record(schema, raw, raw_content, 0)
}

/// Decode a payload that must produce a record list
pub fn decode_list(schema: &Schema, payload: Payload<'_>) -> Result<RecordList> {
    let SchemaKind::List {
        item,
        collection_keys,
    } = schema.kind()
    else {
        return Err(Error::schema_mismatch(schema.name(), "a list schema", "a record schema"));
    };
    let (raw, raw_content) = load(payload)?;
    build_list(schema, item, collection_keys, raw, raw_content, 0)
}

/// Parse JSON text keeping every numeric literal exact
pub fn parse_json(text: &str) -> Result<Value> {
    Ok(serde_json::from_str(text)?)
}

fn load(payload: Payload<'_>) -> Result<(Value, Option<String>)> {
    match payload {
        Payload::Json(text) => Ok((parse_json(text)?, Some(text.to_string()))),
        Payload::Xml(text) => Ok((xml_to_tree(text)?, Some(text.to_string()))),
        Payload::Tree(value) => Ok((value, None)),
    }
}

// ============================================================================
// Schema walking
// ============================================================================

fn decode_value(
    schema: &Schema,
    raw: Value,
    raw_content: Option<String>,
    depth: usize,
) -> Result<Decoded> {
    match schema.kind() {
        SchemaKind::Record { .. } => {
            build_record(schema, raw, raw_content, depth).map(Decoded::Record)
        }
        SchemaKind::List {
            item,
            collection_keys,
        } => build_list(
            schema,
            item,
            collection_keys,
            raw,
            raw_content,
            depth,
        )
        .map(Decoded::List),
    }
}

fn build_list(
    schema: &Schema,
    item: &Schema,
    collection_keys: &[String],
    raw: Value,
    raw_content: Option<String>,
    depth: usize,
) -> Result<RecordList> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { limit: MAX_DEPTH });
    }
    if item.is_list() {
        return Err(Error::schema_mismatch(
            item.name(),
            "a record item schema",
            "a list schema",
        ));
    }

    let source = match collection_keys {
        [] => Some(&raw),
        keys => match &raw {
            Value::Object(map) => keys.iter().find_map(|key| map.get(key)),
            // Already the sequence, as when the wrapper was unwrapped upstream
            Value::Array(_) => Some(&raw),
            Value::Null => None,
            other => {
                return Err(Error::schema_mismatch(
                    schema.name(),
                    "an object",
                    describe(other),
                ))
            }
        },
    };

    let elements: Vec<&Value> = match source {
        // A missing collection is an empty list, not an error
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values.iter().collect(),
        // A repeated XML element that occurred exactly once
        Some(single @ Value::Object(_)) => vec![single],
        Some(other) => {
            return Err(Error::schema_mismatch(
                schema.name(),
                "an array",
                describe(other),
            ))
        }
    };

    let mut items = Vec::with_capacity(elements.len());
    for element in elements {
        items.push(build_record(item, element.clone(), None, depth + 1)?);
    }

    trace!(schema = schema.name(), items = items.len(), "decoded list");
    Ok(RecordList::new(schema.name(), items, raw, raw_content))
}

fn build_record(
    schema: &Schema,
    raw: Value,
    raw_content: Option<String>,
    depth: usize,
) -> Result<Record> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { limit: MAX_DEPTH });
    }

    let Value::Object(map) = &raw else {
        return Err(Error::schema_mismatch(
            schema.name(),
            "an object",
            describe(&raw),
        ));
    };

    let mut fields = Vec::with_capacity(map.len());
    for (name, value) in map {
        let decoded = schema.decoder_for(name).decode(name, value, depth)?;
        fields.push((name.clone(), decoded));
    }

    let mut record = Record::new(schema.name(), raw, raw_content);
    for (name, value) in fields {
        record.push(name, value);
    }
    Ok(record)
}

impl FieldDecoder {
    /// Convert one raw value
    ///
    /// `field` is only used to label errors. An explicit `null` decodes to
    /// [`FieldValue::Null`] for every decoder kind.
    pub fn decode(&self, field: &str, raw: &Value, depth: usize) -> Result<FieldValue> {
        if raw.is_null() {
            return Ok(FieldValue::Null);
        }

        match self {
            FieldDecoder::Raw => Ok(FieldValue::Raw(raw.clone())),
            FieldDecoder::Decimal => decode_decimal(field, raw).map(FieldValue::Decimal),
            FieldDecoder::DateTime => decode_datetime(field, raw).map(FieldValue::DateTime),
            FieldDecoder::Date => decode_date(field, raw).map(FieldValue::Date),
            FieldDecoder::Nested(schema) => {
                match decode_value(schema, raw.clone(), None, depth + 1)? {
                    Decoded::Record(record) => Ok(FieldValue::Record(record)),
                    Decoded::List(list) => Ok(FieldValue::List(list)),
                }
            }
        }
    }
}

// ============================================================================
// Scalar decoders
// ============================================================================

/// Literal text of a scalar, used for both parsing and error messages
fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse an exact decimal from a JSON number or numeric string
pub fn decode_decimal(field: &str, raw: &Value) -> Result<Decimal> {
    let text = scalar_text(raw).ok_or_else(|| Error::parse(field, "decimal", raw.to_string()))?;

    let exact = exact_decimal(&text).ok_or_else(|| Error::parse(field, "decimal", text.clone()))?;

    // Prefer the parsed form when it agrees, it keeps trailing zeros
    Ok(Decimal::from_str(&text)
        .ok()
        .filter(|d| *d == exact)
        .unwrap_or(exact))
}

/// Build a decimal from a plain or scientific literal without rounding
///
/// `None` when the literal is malformed or needs more than 96 bits of
/// mantissa or 28 fractional digits.
fn exact_decimal(text: &str) -> Option<Decimal> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (int.is_empty() && frac.is_empty())
        || !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let frac = frac.trim_end_matches('0');
    let digits = format!("{int}{frac}");
    let digits = digits.trim_start_matches('0');
    let mut value: i128 = match digits.len() {
        0 => 0,
        1..=38 => digits.parse().ok()?,
        _ => return None,
    };

    let mut scale = i64::try_from(frac.len()).ok()? - exponent;
    if scale < 0 {
        let factor = 10i128.checked_pow(u32::try_from(-scale).ok()?)?;
        value = value.checked_mul(factor)?;
        scale = 0;
    }
    if negative {
        value = -value;
    }

    Decimal::try_from_i128_with_scale(value, u32::try_from(scale).ok()?).ok()
}

/// Parse a timestamp, accepting the common ISO-8601 spellings
///
/// Values without an offset are taken to be UTC.
pub fn decode_datetime(field: &str, raw: &Value) -> Result<DateTime<FixedOffset>> {
    let Value::String(text) = raw else {
        return Err(Error::parse(field, "datetime", raw.to_string()));
    };
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt);
    }

    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().fixed_offset());
        }
    }

    Err(Error::parse(field, "datetime", text))
}

/// Parse a strict `YYYY-MM-DD` date
///
/// Exactly three dash-separated numeric components are required; anything
/// else is an error rather than a missing value.
pub fn decode_date(field: &str, raw: &Value) -> Result<NaiveDate> {
    let Value::String(text) = raw else {
        return Err(Error::parse(field, "date", raw.to_string()));
    };

    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() != 3 {
        return Err(Error::parse(field, "date", text.as_str()));
    }

    let invalid = || Error::parse(field, "date", text.as_str());
    let year: i32 = parts[0].trim().parse().map_err(|_| invalid())?;
    let month: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
    let day: u32 = parts[2].trim().parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}
