//! Plaza CLI
//!
//! Command-line interface for the bol.com Plaza seller API

use anyhow::Context;
use clap::Parser;
use plaza_client::cli::{Cli, Runner};
use tracing::Level;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let source = match &cli.config {
        Some(path) => format!("config {}", path.display()),
        None => "environment".to_string(),
    };
    Runner::new(cli)
        .run()
        .await
        .with_context(|| format!("plaza command failed (settings from {source})"))
}
