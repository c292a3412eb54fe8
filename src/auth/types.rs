//! Signing types

use crate::types::Method;
use chrono::{DateTime, Utc};
use std::fmt;

/// Content type every Plaza request is signed with
pub const CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

/// Header carrying the request date
pub const DATE_HEADER: &str = "X-BOL-Date";

/// Header carrying the signature
pub const AUTHORIZATION_HEADER: &str = "X-BOL-Authorization";

/// RFC 1123 date layout used in the date header
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// The parts of a request covered by the signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub method: Method,
    pub content_type: String,
    /// Formatted with [`DATE_FORMAT`]
    pub date: String,
    /// Request path without host or query string
    pub path: String,
}

impl SigningRequest {
    pub fn new(method: Method, path: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            method,
            content_type: CONTENT_TYPE.to_string(),
            date: format_date(date),
            path: path.into(),
        }
    }

    /// The string the HMAC is computed over
    pub fn canonical_string(&self) -> String {
        format!(
            "{}\n\n{}\n{}\nx-bol-date:{}\n{}",
            self.method.as_str(),
            self.content_type,
            self.date,
            self.date,
            self.path
        )
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// API key pair
#[derive(Clone)]
pub struct Credentials {
    pub public_key: String,
    pub private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }
}

// Keep the private key out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
