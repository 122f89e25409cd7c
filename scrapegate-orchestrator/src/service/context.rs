//! Execution context for worker runs
//!
//! Fixes everything about the worker's surroundings:
//! - Working directory (the orchestrator base directory)
//! - Results directory, provisioned on demand and shared by all runs
//! - The complete, explicit environment map

use scrapegate_core::domain::log::LogLevel;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::Config;
use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, ScrapeError};

/// Where and how the worker runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub working_dir: PathBuf,
    pub results_dir: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl ExecutionContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            working_dir: config.base_dir.clone(),
            results_dir: config.results_dir(),
            env: config.worker_env.to_map(),
        }
    }

    /// Makes sure the results directory exists and is writable
    ///
    /// Safe to call from concurrent requests: creation tolerates the directory
    /// appearing underneath it, and the write probe is named after `run_token`
    /// so probes of different runs never clash.
    pub async fn provision(&self, run_token: &str, sink: &dyn DiagnosticSink) -> Result<()> {
        match tokio::fs::metadata(&self.working_dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(ScrapeError::directory(
                    &self.working_dir,
                    "Base directory not found",
                ));
            }
        }

        if !tokio::fs::try_exists(&self.results_dir).await.unwrap_or(false) {
            sink.write(
                LogLevel::Info,
                &format!("Creating results directory: {}", self.results_dir.display()),
            );
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.results_dir).await {
            let is_dir = tokio::fs::metadata(&self.results_dir)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            if e.kind() != ErrorKind::AlreadyExists || !is_dir {
                return Err(ScrapeError::directory(
                    &self.results_dir,
                    format!("Failed to create results directory ({})", e),
                ));
            }
        }

        let probe = self.results_dir.join(format!(".write-probe-{}", run_token));
        if let Err(e) = tokio::fs::write(&probe, b"").await {
            return Err(ScrapeError::directory(
                &self.results_dir,
                format!("Results directory is not writable ({})", e),
            ));
        }

        if let Err(e) = tokio::fs::remove_file(&probe).await {
            sink.write(
                LogLevel::Warning,
                &format!("Failed to remove write probe {}: {}", probe.display(), e),
            );
        }

        Ok(())
    }
}
