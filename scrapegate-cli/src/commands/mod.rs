//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod health;
mod scrape;

pub use scrape::ScrapeArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run a scrape and print the collected jobs
    Scrape(ScrapeArgs),
    /// Check that the orchestrator is reachable
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Scrape(args) => scrape::handle_scrape_command(args, config).await,
        Commands::Health => health::handle_health_command(config).await,
    }
}
