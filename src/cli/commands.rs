//! CLI commands and argument parsing

use crate::types::FulfilmentMethod;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line client for the bol.com Plaza seller API
#[derive(Parser, Debug)]
#[command(name = "plaza")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML); `PLAZA_*` environment variables otherwise
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Talk to the test environment
    #[arg(long, global = true)]
    pub test: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List open orders
    Orders {
        #[arg(long)]
        page: Option<u32>,

        /// FBR or FBB
        #[arg(long)]
        fulfilment_method: Option<FulfilmentMethod>,
    },

    /// List shipments
    Shipments {
        #[arg(long)]
        page: Option<u32>,

        /// FBR or FBB
        #[arg(long)]
        fulfilment_method: Option<FulfilmentMethod>,

        #[arg(long)]
        order_id: Option<String>,
    },

    /// Show the status of an asynchronous process
    ProcessStatus {
        /// Process status id
        id: String,
    },

    /// List unhandled returns
    Returns,

    /// List warehouse inventory
    Inventory {
        #[arg(long)]
        page: Option<u32>,

        /// Quantity range, e.g. 0-10
        #[arg(long)]
        quantity: Option<String>,

        /// sufficient or insufficient
        #[arg(long)]
        stock: Option<String>,

        /// saleable or unsaleable
        #[arg(long)]
        state: Option<String>,

        /// EAN, BSKU or title search
        #[arg(long)]
        query: Option<String>,
    },

    /// Encode a JSON file of request fields as a request document (offline)
    Encode {
        /// Root element name, e.g. ShipmentRequest
        root: String,

        /// v1, v2, offers or a namespace URI
        #[arg(long, default_value = "v2")]
        namespace: String,

        /// Group every list under a single element, as inbound requests do
        #[arg(long)]
        inbound: bool,

        /// JSON object with the request fields
        input: PathBuf,
    },

    /// Decode a saved JSON or XML response against a model (offline)
    Decode {
        /// Model name, see `plaza models`
        model: String,

        /// Saved response body
        input: PathBuf,
    },

    /// List the models accepted by `decode`
    Models,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orders() {
        let cli = Cli::try_parse_from([
            "plaza",
            "--test",
            "orders",
            "--page",
            "2",
            "--fulfilment-method",
            "fbb",
        ])
        .unwrap();

        assert!(cli.test);
        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Orders {
                page,
                fulfilment_method,
            } => {
                assert_eq!(page, Some(2));
                assert_eq!(fulfilment_method, Some(FulfilmentMethod::Fbb));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_encode_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "plaza",
            "encode",
            "InboundRequest",
            "--namespace",
            "v1",
            "--inbound",
            "request.json",
            "-v",
            "-C",
            "plaza.yaml",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("plaza.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Encode { ref root, inbound: true, .. } if root == "InboundRequest"
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_fulfilment_method() {
        assert!(Cli::try_parse_from(["plaza", "orders", "--fulfilment-method", "xyz"]).is_err());
    }
}
