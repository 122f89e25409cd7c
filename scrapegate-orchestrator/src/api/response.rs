//! Response formatting
//!
//! Builds the `ScrapeResponse` envelope for both outcomes. Artifact paths are
//! reported relative to the base directory.

use scrapegate_core::dto::scrape::{ScrapeData, ScrapeResponse};

use crate::error::ScrapeError;
use crate::service::CompletedRun;

/// Envelope for a completed run
pub fn success(run: CompletedRun) -> ScrapeResponse {
    ScrapeResponse::completed(ScrapeData {
        total_jobs: run.jobs.len(),
        csv_file: run.artifacts.csv_relative,
        json_file: run.artifacts.json_relative,
        jobs: run.jobs,
    })
}

/// Envelope for a failed request
pub fn failure(err: &ScrapeError) -> ScrapeResponse {
    ScrapeResponse::failed(err.to_string())
}
