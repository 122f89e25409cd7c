//! Scrape service
//!
//! Runs one request through every stage:
//! validate → name → provision → build command → execute → collect.
//! Any stage can end the request; nothing is retried.

use chrono::Utc;
use scrapegate_core::domain::log::LogLevel;
use scrapegate_core::domain::scrape::{JobRecord, ScrapeRequest};
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::service::collector;
use crate::service::command::CommandBuilder;
use crate::service::context::ExecutionContext;
use crate::service::executor::{ProcessExecutor, WorkerExecutor};
use crate::service::naming::{ArtifactNamer, RunArtifacts};
use crate::service::validator;

/// A request that made it through every stage
#[derive(Debug, Clone)]
pub struct CompletedRun {
    pub request: ScrapeRequest,
    pub artifacts: RunArtifacts,
    pub jobs: Vec<JobRecord>,
}

/// Orchestrates worker runs for scrape requests
pub struct ScrapeService {
    context: ExecutionContext,
    namer: ArtifactNamer,
    builder: CommandBuilder,
    executor: Arc<dyn WorkerExecutor>,
    sink: Arc<dyn DiagnosticSink>,
}

impl ScrapeService {
    /// Creates a service with explicit collaborators
    pub fn new(
        config: &Config,
        executor: Arc<dyn WorkerExecutor>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            context: ExecutionContext::from_config(config),
            namer: ArtifactNamer::new(config.results_dir(), config.results_dir_name.clone()),
            builder: CommandBuilder::new(config.worker_path(), config.worker_interpreter.clone()),
            executor,
            sink,
        }
    }

    /// Creates a service that spawns real processes and logs through `tracing`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config,
            Arc::new(ProcessExecutor::new(config.worker_timeout)),
            Arc::new(TracingSink),
        )
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Handles one raw request body
    ///
    /// A failure is reported to the sink exactly once, at error level.
    pub async fn scrape(&self, body: &[u8]) -> Result<CompletedRun> {
        match self.run(body).await {
            Ok(run) => {
                self.sink.write(
                    LogLevel::Info,
                    &format!(
                        "Scrape {} completed with {} job(s)",
                        run.artifacts.identity,
                        run.jobs.len()
                    ),
                );
                Ok(run)
            }
            Err(e) => {
                self.sink.write(
                    LogLevel::Error,
                    &format!("Scrape request failed [{}]: {}", e.kind(), e),
                );
                Err(e)
            }
        }
    }

    async fn run(&self, body: &[u8]) -> Result<CompletedRun> {
        let sink = self.sink.as_ref();
        sink.write(LogLevel::Info, "Scrape request started");

        let request = validator::validate_request(body)?;
        sink.write(
            LogLevel::Debug,
            &format!(
                "Validated request: job_board={:?} location={:?} keywords={:?} max_pages={:?}",
                request.job_board, request.location, request.keywords, request.max_pages
            ),
        );

        let artifacts = self.namer.name(Utc::now());
        self.context
            .provision(artifacts.identity.as_str(), sink)
            .await?;

        let command = self
            .builder
            .build(&request, &self.context, &artifacts, sink)
            .await?;
        sink.write(LogLevel::Info, &format!("Executing worker: {}", command));

        let outcome = self.executor.execute(&command, &self.context).await?;

        if !outcome.stdout.trim().is_empty() {
            sink.write(
                LogLevel::Debug,
                &format!("Worker output: {}", outcome.stdout.trim()),
            );
        }
        if !outcome.stderr.trim().is_empty() {
            // stderr is advisory when the worker succeeded
            let level = if outcome.succeeded() {
                LogLevel::Warning
            } else {
                LogLevel::Debug
            };
            sink.write(level, &format!("Worker errors: {}", outcome.stderr.trim()));
        }
        sink.write(
            LogLevel::Debug,
            &format!("Worker exit code: {}", outcome.exit_code),
        );

        let jobs = collector::collect(&outcome, &artifacts.json_path).await?;

        Ok(CompletedRun {
            request,
            artifacts,
            jobs,
        })
    }
}
