//! # Plaza Client
//!
//! A typed client for the bol.com Plaza seller API.
//!
//! ## Features
//!
//! - **Schema-driven decoding**: JSON and XML responses walked against
//!   declarative schemas into records with exact decimals and timestamps
//! - **Deterministic request documents**: XML bodies with sorted elements,
//!   fixed indentation and the dialect of each endpoint
//! - **Request signing**: HMAC-SHA256 `X-BOL-Authorization` on every attempt
//! - **Resilient transport**: retries with backoff and client-side rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plaza_client::{ClientConfig, PlazaApi, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = PlazaApi::new(ClientConfig::from_env()?)?;
//!
//!     for order in &api.orders().list(Some(1), None).await? {
//!         println!("{:?}", order.get("orderId"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                 PlazaApi resource façades                  │
//! │  orders  shipments  transports  offers  inbounds  ...      │
//! └────────────────────────────────────────────────────────────┘
//!          │                    │                    │
//! ┌────────┴───────┬────────────┴───────┬────────────┴───────┐
//! │     Encode     │        HTTP        │       Decode       │
//! ├────────────────┼────────────────────┼────────────────────┤
//! │ XmlFields      │ Retry / backoff    │ Schema catalog     │
//! │ Namespaces     │ Rate limit         │ JSON / XML trees   │
//! │ List layouts   │ HMAC signing       │ Decimal, DateTime  │
//! └────────────────┴────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Response decoding
pub mod decode;

/// Request document encoding
pub mod encode;

/// Response schema catalog
pub mod models;

/// Request signing
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Resource façades
pub mod api;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use api::PlazaApi;
pub use config::{load_config, ClientConfig, Environment};
pub use decode::{Decoded, Payload, Record, RecordList, Schema};
pub use encode::{EncoderConfig, XmlFields, XmlValue};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
