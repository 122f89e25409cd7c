//! Scrape command handler
//!
//! Submits one scrape request and prints what came back, either as a
//! colored summary or as raw JSON for piping.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use scrapegate_client::{ScrapeClient, ScrapeData};
use scrapegate_core::domain::scrape::{JobRecord, ScrapeRequest};

use crate::config::Config;

/// Fields shown for each job in the summary, in order
const SUMMARY_FIELDS: &[(&str, &str)] = &[
    ("job_location", "Location"),
    ("salary", "Salary"),
    ("closing_date", "Closes"),
];

/// Arguments for the scrape command
#[derive(Args)]
pub struct ScrapeArgs {
    /// Job board to scrape (e.g. careers24, pnet, indeed)
    #[arg(long)]
    job_board: String,

    /// Location to search in
    #[arg(long)]
    location: String,

    /// Search keywords
    #[arg(long)]
    keywords: Option<String>,

    /// Maximum number of result pages to fetch
    #[arg(long)]
    max_pages: Option<u32>,

    /// Print the collected data as JSON
    #[arg(long)]
    json: bool,
}

impl ScrapeArgs {
    fn to_request(&self) -> ScrapeRequest {
        let mut request = ScrapeRequest::new(&self.job_board, &self.location);
        if let Some(keywords) = &self.keywords {
            request = request.with_keywords(keywords);
        }
        if let Some(max_pages) = self.max_pages {
            request = request.with_max_pages(max_pages);
        }
        request
    }
}

/// Handle the scrape command
pub async fn handle_scrape_command(args: ScrapeArgs, config: &Config) -> Result<()> {
    let client = ScrapeClient::new(&config.server_url);
    let request = args.to_request();

    if !args.json {
        println!(
            "{} Scraping {} for {}...",
            "▸".cyan(),
            request.job_board.bold(),
            request.location.bold()
        );
    }

    let data = client
        .scrape(&request)
        .await
        .context("Scrape request failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_scrape_summary(&data);
    }

    Ok(())
}

/// Print the artifact paths and a short line per job
fn print_scrape_summary(data: &ScrapeData) {
    println!(
        "{} {}",
        "✓".green(),
        format!("Collected {} job(s)", data.total_jobs).bold()
    );
    println!("  CSV:  {}", data.csv_file.dimmed());
    println!("  JSON: {}", data.json_file.dimmed());

    if data.jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
        return;
    }

    println!("{}", "─".repeat(80).dimmed());
    for job in &data.jobs {
        print_job(job);
    }
    println!("{}", "─".repeat(80).dimmed());
}

fn print_job(job: &JobRecord) {
    let title = field(job, "job_title").unwrap_or_else(|| "(untitled)".to_string());
    println!("  {} {}", "▸".cyan(), title.bold());

    for (key, label) in SUMMARY_FIELDS {
        if let Some(value) = field(job, key) {
            println!("    {:<9} {}", format!("{}:", label), value.dimmed());
        }
    }
}

/// Renders a record field, skipping absent and null values
fn field(job: &JobRecord, key: &str) -> Option<String> {
    match job.get(key)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
