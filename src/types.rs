//! Common types used throughout the Plaza client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Upper-case verb as it appears in the signed string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Fulfilment Method
// ============================================================================

/// Who fulfils an order: the retailer or bol.com
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FulfilmentMethod {
    /// Fulfilment by retailer
    Fbr,
    /// Fulfilment by bol.com
    Fbb,
}

impl FulfilmentMethod {
    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfilmentMethod::Fbr => "FBR",
            FulfilmentMethod::Fbb => "FBB",
        }
    }
}

impl FromStr for FulfilmentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FBR" => Ok(FulfilmentMethod::Fbr),
            "FBB" => Ok(FulfilmentMethod::Fbb),
            _ => Err(Error::invalid_argument(
                "fulfilment_method",
                format!("unknown fulfilment method '{s}'"),
            )),
        }
    }
}

// ============================================================================
// Transporter Code
// ============================================================================

macro_rules! transporter_codes {
    ($($variant:ident => $code:literal),+ $(,)?) => {
        /// Carrier codes accepted by the shipment and transport endpoints
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TransporterCode {
            $(
                #[doc = $code]
                $variant,
            )+
        }

        impl TransporterCode {
            /// Every known code, in declaration order
            pub const ALL: &'static [TransporterCode] = &[$(TransporterCode::$variant),+];

            /// Wire value of the code
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(TransporterCode::$variant => $code,)+
                }
            }
        }

        impl FromStr for TransporterCode {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($code => Ok(TransporterCode::$variant),)+
                    _ => Err(Error::invalid_argument(
                        "transporter_code",
                        format!("unknown transporter code '{s}'"),
                    )),
                }
            }
        }
    };
}

transporter_codes! {
    DhlForYou => "DHLFORYOU",
    Ups => "UPS",
    Tnt => "TNT",
    TntExtra => "TNT-EXTRA",
    TntBrief => "TNT_BRIEF",
    TntExpress => "TNT-EXPRESS",
    Courier => "COURIER",
    Dyl => "DYL",
    DpdNl => "DPD-NL",
    DpdBe => "DPD-BE",
    BpostBe => "BPOST_BE",
    BpostBrief => "BPOST_BRIEF",
    Briefpost => "BRIEFPOST",
    Gls => "GLS",
    FedexNl => "FEDEX_NL",
    FedexBe => "FEDEX_BE",
    Other => "OTHER",
    Dhl => "DHL",
    DhlDe => "DHL_DE",
    DhlGlobalMail => "DHL-GLOBAL-MAIL",
    Tsn => "TSN",
    Fiege => "FIEGE",
    Transmission => "TRANSMISSION",
    ParcelNl => "PARCEL-NL",
    Logoix => "LOGOIX",
    Packs => "PACKS",
    Rjp => "RJP",
}

impl fmt::Display for TransporterCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
