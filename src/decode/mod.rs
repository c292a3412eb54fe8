//! Response decoder module
//!
//! Supports: JSON text, XML text, pre-parsed trees
//!
//! # Overview
//!
//! A [`Schema`] names the decoder for each field of one payload shape.
//! [`decode`] walks a payload against a schema and produces a [`Record`] or
//! a [`RecordList`]. Fields the schema does not mention are kept as raw
//! values, so new API fields never break decoding.
//!
//! ```rust,ignore
//! use plaza_client::decode::{decode_list, Payload};
//! use plaza_client::models;
//!
//! let orders = decode_list(&models::ORDERS, Payload::Json(body))?;
//! for order in &orders {
//!     println!("{:?}", order.get("orderPlacedDateTime"));
//! }
//! ```

mod decoders;
mod types;
mod xml;

pub use decoders::{
    decode, decode_date, decode_datetime, decode_decimal, decode_list, decode_record, parse_json,
    MAX_DEPTH,
};
pub use types::{Decoded, FieldDecoder, FieldValue, Payload, Record, RecordList, Schema, SchemaKind};
pub use xml::{xml_to_tree, MAX_XML_DEPTH, TEXT_KEY};
