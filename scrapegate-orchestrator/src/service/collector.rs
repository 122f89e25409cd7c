//! Result collection
//!
//! Interprets a worker's outcome and loads the JSON artifact it was obliged
//! to write.

use scrapegate_core::domain::scrape::JobRecord;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, ScrapeError};
use crate::service::executor::ProcessOutcome;

/// Checks the outcome and decodes the job records at `json_path`
pub async fn collect(outcome: &ProcessOutcome, json_path: &Path) -> Result<Vec<JobRecord>> {
    if !outcome.succeeded() {
        return Err(ScrapeError::WorkerFailed {
            exit_code: outcome.exit_code,
            stderr: outcome.stderr.clone(),
        });
    }

    let content = match tokio::fs::read(json_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ScrapeError::ArtifactMissing {
                path: json_path.to_path_buf(),
                stdout: outcome.stdout.clone(),
                stderr: outcome.stderr.clone(),
            });
        }
        Err(e) => {
            return Err(ScrapeError::CorruptArtifact {
                path: json_path.to_path_buf(),
                reason: format!("failed to read file ({})", e),
            });
        }
    };

    serde_json::from_slice::<Vec<JobRecord>>(&content).map_err(|e| {
        ScrapeError::CorruptArtifact {
            path: json_path.to_path_buf(),
            reason: e.to_string(),
        }
    })
}
