//! Health command handler

use anyhow::{Context, Result};
use colored::*;
use scrapegate_client::ScrapeClient;

use crate::config::Config;

pub async fn handle_health_command(config: &Config) -> Result<()> {
    let client = ScrapeClient::new(&config.server_url);

    client
        .health()
        .await
        .with_context(|| format!("Orchestrator at {} is not healthy", client.base_url()))?;

    println!(
        "{} Orchestrator at {} is up",
        "✓".green(),
        client.base_url().cyan()
    );
    Ok(())
}
