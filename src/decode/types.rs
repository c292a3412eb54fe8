//! Decoder types
//!
//! Schemas describe how a payload shape maps onto typed values; records and
//! record lists are what decoding produces.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

// ============================================================================
// Schema
// ============================================================================

/// Per-field conversion applied to one raw value
#[derive(Debug, Clone, Default)]
pub enum FieldDecoder {
    /// Pass the value through unchanged
    #[default]
    Raw,
    /// Exact decimal number
    Decimal,
    /// Permissive ISO-8601 timestamp
    DateTime,
    /// Strict `YYYY-MM-DD` date
    Date,
    /// Recurse into another schema
    Nested(Arc<Schema>),
}

impl FieldDecoder {
    /// Shorthand for a nested decoder
    pub fn nested(schema: &Arc<Schema>) -> Self {
        FieldDecoder::Nested(Arc::clone(schema))
    }

    /// Short name used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldDecoder::Raw => "raw",
            FieldDecoder::Decimal => "decimal",
            FieldDecoder::DateTime => "datetime",
            FieldDecoder::Date => "date",
            FieldDecoder::Nested(_) => "nested",
        }
    }
}

/// Shape of a schema
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// A single object whose fields are decoded individually
    Record {
        /// Declared field decoders; undeclared fields use [`FieldDecoder::Raw`]
        fields: HashMap<String, FieldDecoder>,
    },
    /// A sequence of objects sharing one item schema
    List {
        /// Schema applied to every item
        item: Arc<Schema>,
        /// Keys under which the payload may nest its items, tried in order
        collection_keys: Vec<String>,
    },
}

/// Declarative description of one payload shape
///
/// Schemas are immutable once built and are shared through `Arc`, so a
/// single definition can be referenced by any number of parents.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    kind: SchemaKind,
}

impl Schema {
    /// Start a record schema with no declared fields
    pub fn record(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SchemaKind::Record {
                fields: HashMap::new(),
            },
        }
    }

    /// Start a list schema over `item`
    pub fn list(name: impl Into<String>, item: &Arc<Schema>) -> Self {
        Self {
            name: name.into(),
            kind: SchemaKind::List {
                item: Arc::clone(item),
                collection_keys: Vec::new(),
            },
        }
    }

    /// Declare a field decoder (record schemas only; ignored for lists)
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, decoder: FieldDecoder) -> Self {
        if let SchemaKind::Record { fields } = &mut self.kind {
            fields.insert(name.into(), decoder);
        }
        self
    }

    /// Add a collection key (list schemas only; ignored for records)
    ///
    /// May be called more than once, e.g. for the JSON key and the XML
    /// element name of the same collection. The first key present in the
    /// payload wins.
    #[must_use]
    pub fn collection_key(mut self, key: impl Into<String>) -> Self {
        if let SchemaKind::List {
            collection_keys, ..
        } = &mut self.kind
        {
            collection_keys.push(key.into());
        }
        self
    }

    /// Freeze the schema for sharing
    pub fn build(self) -> Arc<Schema> {
        Arc::new(self)
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema shape
    pub fn kind(&self) -> &SchemaKind {
        &self.kind
    }

    /// Whether this is a list schema
    pub fn is_list(&self) -> bool {
        matches!(self.kind, SchemaKind::List { .. })
    }

    /// Decoder for a field, falling back to [`FieldDecoder::Raw`]
    pub fn decoder_for(&self, field: &str) -> &FieldDecoder {
        static RAW: FieldDecoder = FieldDecoder::Raw;
        match &self.kind {
            SchemaKind::Record { fields } => fields.get(field).unwrap_or(&RAW),
            SchemaKind::List { .. } => &RAW,
        }
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Input to the decoder
#[derive(Debug, Clone)]
pub enum Payload<'a> {
    /// JSON text; numbers keep their exact literal
    Json(&'a str),
    /// XML text; converted to a tag-keyed tree first
    Xml(&'a str),
    /// An already-structured tree
    Tree(Value),
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Json(text)
    }
}

impl From<Value> for Payload<'_> {
    fn from(value: Value) -> Self {
        Payload::Tree(value)
    }
}

// ============================================================================
// Decoded values
// ============================================================================

/// One decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit null in the payload
    Null,
    /// Undeclared or raw field, passed through unchanged
    Raw(Value),
    /// Exact decimal
    Decimal(Decimal),
    /// Timestamp with offset (UTC when the payload had none)
    DateTime(DateTime<FixedOffset>),
    /// Calendar date
    Date(NaiveDate),
    /// Nested record
    Record(Record),
    /// Nested list of records
    List(RecordList),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            FieldValue::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// String content of a raw string value
    pub fn as_str(&self) -> Option<&str> {
        self.as_raw().and_then(Value::as_str)
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            FieldValue::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&RecordList> {
        match self {
            FieldValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Raw(v) => v.serialize(serializer),
            FieldValue::Decimal(d) => Serialize::serialize(d, serializer),
            FieldValue::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            FieldValue::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            FieldValue::Record(r) => r.serialize(serializer),
            FieldValue::List(l) => l.serialize(serializer),
        }
    }
}

/// One decoded object: fields in payload order plus the raw payload
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: String,
    fields: Vec<(String, FieldValue)>,
    raw: Value,
    raw_content: Option<String>,
}

impl Record {
    pub(crate) fn new(schema: &str, raw: Value, raw_content: Option<String>) -> Self {
        Self {
            schema: schema.to_string(),
            fields: Vec::new(),
            raw,
            raw_content,
        }
    }

    pub(crate) fn push(&mut self, name: String, value: FieldValue) {
        self.fields.push((name, value));
    }

    /// Name of the schema this record was decoded with
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate fields in payload order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Field names in payload order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The payload this record was decoded from
    pub fn raw_payload(&self) -> &Value {
        &self.raw
    }

    /// The original text, when decoding started from text
    pub fn raw_content(&self) -> Option<&str> {
        self.raw_content.as_deref()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Ordered sequence of records sharing one item schema
#[derive(Debug, Clone, PartialEq)]
pub struct RecordList {
    schema: String,
    items: Vec<Record>,
    raw: Value,
    raw_content: Option<String>,
}

impl RecordList {
    pub(crate) fn new(schema: &str, items: Vec<Record>, raw: Value, raw_content: Option<String>) -> Self {
        Self {
            schema: schema.to_string(),
            items,
            raw,
            raw_content,
        }
    }

    /// Name of the list schema
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// The payload this list was decoded from
    pub fn raw_payload(&self) -> &Value {
        &self.raw
    }

    /// The original text, when decoding started from text
    pub fn raw_content(&self) -> Option<&str> {
        self.raw_content.as_deref()
    }

    /// Consume the list, keeping only the records
    pub fn into_records(self) -> Vec<Record> {
        self.items
    }
}

impl Deref for RecordList {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for RecordList {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl Serialize for RecordList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Result of decoding a payload against a schema
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Record(Record),
    List(RecordList),
}

impl Decoded {
    pub fn into_record(self) -> Option<Record> {
        match self {
            Decoded::Record(r) => Some(r),
            Decoded::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<RecordList> {
        match self {
            Decoded::List(l) => Some(l),
            Decoded::Record(_) => None,
        }
    }

    /// The payload this value was decoded from
    pub fn raw_payload(&self) -> &Value {
        match self {
            Decoded::Record(r) => r.raw_payload(),
            Decoded::List(l) => l.raw_payload(),
        }
    }
}

impl Serialize for Decoded {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Decoded::Record(r) => r.serialize(serializer),
            Decoded::List(l) => l.serialize(serializer),
        }
    }
}

/// Human-readable JSON type name for diagnostics
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SchemaKind::Record { fields } => {
                write!(f, "{} (record, {} declared fields)", self.name, fields.len())
            }
            SchemaKind::List {
                item,
                collection_keys,
            } => match collection_keys.as_slice() {
                [] => write!(f, "{} (list of {})", self.name, item.name),
                keys => write!(
                    f,
                    "{} (list of {} under '{}')",
                    self.name,
                    item.name,
                    keys.join("' | '")
                ),
            },
        }
    }
}
