//! Request encoder module
//!
//! Builds the XML request documents the Plaza API accepts from plain
//! tag/value mappings:
//!
//! ```rust,ignore
//! use plaza_client::encode::{encode, EncoderConfig};
//! use plaza_client::xml_fields;
//!
//! let fields = xml_fields! {
//!     "TransporterCode" => "DHLFORYOU",
//!     "TrackAndTrace" => "3SAOLD1234567",
//! };
//! let body = encode("ChangeTransportRequest", &EncoderConfig::plaza(), &fields)?;
//! ```
//!
//! The same fields always produce the same bytes. A list of mappings becomes
//! sibling elements sharing the list's tag under the default dialect, or one
//! element holding every item under [`EncoderConfig::inbound`].

mod types;
mod writer;

pub use types::{fields_from_json, EncoderConfig, ListLayout, Namespace, XmlFields, XmlValue};
pub use writer::encode;
