//! Encoder types
//!
//! [`XmlValue`] is the value side of one request element; [`EncoderConfig`]
//! selects the namespace and the list layout rules of a request dialect.

use crate::error::{Error, Result};
use crate::types::TransporterCode;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Child elements of one element, always iterated in tag order
pub type XmlFields = BTreeMap<String, XmlValue>;

/// Value of a request element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Element is omitted
    Null,
    Text(String),
    Integer(i64),
    Decimal(Decimal),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
    NaiveDateTime(NaiveDateTime),
    /// Child elements
    Map(XmlFields),
    /// Repeated or grouped content, see [`ListLayout`]
    List(Vec<XmlValue>),
}

impl XmlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, XmlValue::Null)
    }

    /// Whether the value renders as element text rather than children
    pub fn is_scalar(&self) -> bool {
        !matches!(self, XmlValue::Map(_) | XmlValue::List(_))
    }
}

macro_rules! impl_from_for_xml_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for XmlValue {
                fn from(value: $ty) -> Self {
                    XmlValue::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_for_xml_value! {
    String => Text,
    &str => Text,
    i64 => Integer,
    i32 => Integer,
    u32 => Integer,
    Decimal => Decimal,
    f64 => Float,
    bool => Bool,
    NaiveDate => Date,
    NaiveDateTime => NaiveDateTime,
    XmlFields => Map,
}

impl<Tz: TimeZone> From<DateTime<Tz>> for XmlValue {
    fn from(value: DateTime<Tz>) -> Self {
        XmlValue::DateTime(value.fixed_offset())
    }
}

impl From<TransporterCode> for XmlValue {
    fn from(value: TransporterCode) -> Self {
        XmlValue::Text(value.as_str().to_string())
    }
}

impl<T: Into<XmlValue>> From<Option<T>> for XmlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(XmlValue::Null, Into::into)
    }
}

impl<T: Into<XmlValue>> From<Vec<T>> for XmlValue {
    fn from(values: Vec<T>) -> Self {
        XmlValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for XmlValue {
    type Error = Error;

    /// Convert a JSON tree; numbers stay exact
    fn try_from(value: Value) -> Result<Self> {
        Ok(match value {
            Value::Null => XmlValue::Null,
            Value::Bool(b) => XmlValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    XmlValue::Integer(i)
                } else {
                    let literal = n.to_string();
                    Decimal::from_str(&literal)
                        .or_else(|_| Decimal::from_scientific(&literal))
                        .map(XmlValue::Decimal)
                        .map_err(|_| Error::encoding(literal.clone(), "number is out of range"))?
                }
            }
            Value::String(s) => XmlValue::Text(s),
            Value::Array(items) => XmlValue::List(
                items
                    .into_iter()
                    .map(XmlValue::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => XmlValue::Map(
                map.into_iter()
                    .map(|(k, v)| Ok((k, XmlValue::try_from(v)?)))
                    .collect::<Result<XmlFields>>()?,
            ),
        })
    }
}

/// Convert a JSON object into request fields
pub fn fields_from_json(value: Value) -> Result<XmlFields> {
    match XmlValue::try_from(value)? {
        XmlValue::Map(fields) => Ok(fields),
        XmlValue::Null => Ok(XmlFields::new()),
        _ => Err(Error::encoding("<root>", "request fields must be a JSON object")),
    }
}

/// Build [`XmlFields`] from `tag => value` pairs
///
/// ```rust,ignore
/// let fields = xml_fields! {
///     "TransporterCode" => "TNT",
///     "TrackAndTrace" => Some("3SAOLD1234567"),
/// };
/// ```
#[macro_export]
macro_rules! xml_fields {
    ($($tag:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields = $crate::encode::XmlFields::new();
        $(
            fields.insert(
                ::std::string::String::from($tag),
                $crate::encode::XmlValue::from($value),
            );
        )*
        fields
    }};
}

// ============================================================================
// Configuration
// ============================================================================

/// Namespace URI carried by the request root element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Namespace {
    /// Plaza services v2 (most endpoints)
    #[default]
    PlazaV2,
    /// Plaza services v1 (inbound shipments)
    PlazaV1,
    /// Offers API v2
    OffersV2,
    /// Any other URI
    Custom(String),
}

impl Namespace {
    pub fn uri(&self) -> &str {
        match self {
            Namespace::PlazaV2 => "https://plazaapi.bol.com/services/xsd/v2/plazaapi.xsd",
            Namespace::PlazaV1 => "https://plazaapi.bol.com/services/xsd/v1/plazaapi.xsd",
            Namespace::OffersV2 => "https://plazaapi.bol.com/offers/xsd/api-2.0.xsd",
            Namespace::Custom(uri) => uri,
        }
    }
}

impl FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v2" | "plaza-v2" => Ok(Namespace::PlazaV2),
            "v1" | "plaza-v1" => Ok(Namespace::PlazaV1),
            "offers" | "offers-v2" => Ok(Namespace::OffersV2),
            uri if uri.starts_with("http://") || uri.starts_with("https://") => {
                Ok(Namespace::Custom(uri.to_string()))
            }
            _ => Err(Error::invalid_argument(
                "namespace",
                format!("unknown namespace '{s}'"),
            )),
        }
    }
}

/// How a list value is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListLayout {
    /// One sibling element per item, all with the list's tag
    Repeated,
    /// A single element whose content is every item in order
    Grouped,
}

/// Request dialect: namespace plus list rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Root namespace
    pub namespace: Namespace,
    /// Layout of lists containing mappings
    pub record_lists: ListLayout,
    /// Layout of lists containing only scalars. `Grouped` concatenates the
    /// values with no separator, which only makes sense for code-like values.
    pub scalar_lists: ListLayout,
    /// Escape `&`, `<` and `>` in element text
    pub escape_text: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::plaza()
    }
}

impl EncoderConfig {
    /// Generic Plaza request dialect
    pub fn plaza() -> Self {
        Self {
            namespace: Namespace::PlazaV2,
            record_lists: ListLayout::Repeated,
            scalar_lists: ListLayout::Grouped,
            escape_text: true,
        }
    }

    /// Offers API request dialect
    pub fn offers() -> Self {
        Self {
            namespace: Namespace::OffersV2,
            ..Self::plaza()
        }
    }

    /// Inbound shipment creation: every list is grouped under one element
    pub fn inbound() -> Self {
        Self {
            namespace: Namespace::PlazaV1,
            record_lists: ListLayout::Grouped,
            scalar_lists: ListLayout::Grouped,
            escape_text: true,
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    #[must_use]
    pub fn with_scalar_lists(mut self, layout: ListLayout) -> Self {
        self.scalar_lists = layout;
        self
    }

    /// Embed text exactly as given, for byte parity with legacy payloads
    #[must_use]
    pub fn without_escaping(mut self) -> Self {
        self.escape_text = false;
        self
    }
}
