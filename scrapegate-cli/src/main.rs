//! Scrapegate CLI
//!
//! Command-line interface for running scrapes through the scrapegate orchestrator.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "scrapegate")]
#[command(about = "Scrapegate job scraping CLI", long_about = None)]
struct Cli {
    /// Orchestrator URL
    #[arg(long, env = "SCRAPEGATE_URL", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server,
    };

    handle_command(cli.command, &config).await
}
