//! Error types for scrape orchestration
//!
//! Every failure a request can hit maps to exactly one variant. All of them are
//! terminal for the request; none are retried.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for orchestration steps
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while handling a scrape request
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Request body was empty, undecodable or had the wrong shape
    #[error("{0}")]
    MalformedInput(String),

    /// `jobBoard` and/or `location` were absent
    #[error("Missing required parameters: jobBoard and location are required")]
    MissingParameter { missing: Vec<&'static str> },

    /// Base or results directory could not be used
    #[error("{reason}: {}", .path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    /// Worker entry point does not exist
    #[error("Worker not found: {}", .0.display())]
    WorkerNotFound(PathBuf),

    /// Worker process could not be created or supervised
    #[error("Failed to execute worker: {0}")]
    SpawnFailure(#[source] std::io::Error),

    /// Worker exited with a non-zero status
    #[error("Worker failed (exit code {exit_code}): {stderr}")]
    WorkerFailed { exit_code: i32, stderr: String },

    /// Worker exceeded its execution time and was killed
    #[error("Worker timed out after {timeout:?}")]
    WorkerTimeout { timeout: Duration },

    /// Worker exited successfully without writing its JSON artifact
    #[error(
        "JSON file not found: {}\nCommand output: {stdout}\nErrors: {stderr}",
        .path.display()
    )]
    ArtifactMissing {
        path: PathBuf,
        stdout: String,
        stderr: String,
    },

    /// JSON artifact could not be read or is not a JSON array
    #[error("Invalid JSON in output file {}: {reason}", .path.display())]
    CorruptArtifact { path: PathBuf, reason: String },
}

impl ScrapeError {
    /// Stable category name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "malformed_input",
            Self::MissingParameter { .. } => "missing_parameter",
            Self::DirectoryUnavailable { .. } => "directory_unavailable",
            Self::WorkerNotFound(_) => "worker_not_found",
            Self::SpawnFailure(_) => "spawn_failure",
            Self::WorkerFailed { .. } => "worker_failed",
            Self::WorkerTimeout { .. } => "worker_timeout",
            Self::ArtifactMissing { .. } => "artifact_missing",
            Self::CorruptArtifact { .. } => "corrupt_artifact",
        }
    }

    pub(crate) fn directory(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DirectoryUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
