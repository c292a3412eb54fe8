//! CLI module
//!
//! Command-line interface of the `plaza` binary.
//!
//! # Commands
//!
//! - `orders`, `shipments`, `process-status`, `returns`, `inventory` - call the API
//! - `encode` - turn a JSON file of request fields into a request document
//! - `decode` - decode a saved response body against a model
//! - `models` - list the models `decode` accepts

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{decode_file, encode_file, Runner};
