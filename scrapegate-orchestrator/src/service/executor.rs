//! Worker process execution
//!
//! Spawns the worker with a fixed working directory and a cleared environment,
//! closes its stdin, drains stdout and stderr, and waits for it to exit or for
//! the timeout to expire. Exit codes are reported, not interpreted.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::service::command::WorkerCommand;
use crate::service::context::ExecutionContext;

/// Exit code reported when the worker was terminated by a signal
pub const SIGNALLED_EXIT_CODE: i32 = -1;

/// Captured result of a finished worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ProcessOutcome {
    /// Exit code 0 is the only success signal
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs worker commands
///
/// Trait-based so the scrape service can be exercised without real processes.
#[async_trait]
pub trait WorkerExecutor: Send + Sync {
    /// Runs `command` to completion inside `context`
    ///
    /// # Returns
    /// The captured outcome, whatever the exit code
    async fn execute(
        &self,
        command: &WorkerCommand,
        context: &ExecutionContext,
    ) -> Result<ProcessOutcome>;
}

/// Executes the worker as a child process
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    timeout: Duration,
}

impl ProcessExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl WorkerExecutor for ProcessExecutor {
    async fn execute(
        &self,
        command: &WorkerCommand,
        context: &ExecutionContext,
    ) -> Result<ProcessOutcome> {
        debug!(
            "Spawning worker in {}: {}",
            context.working_dir.display(),
            command
        );

        let child = Command::new(command.program())
            .args(command.args())
            .current_dir(&context.working_dir)
            .env_clear()
            .envs(&context.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ScrapeError::SpawnFailure)?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(ScrapeError::SpawnFailure)?,
            Err(_) => {
                return Err(ScrapeError::WorkerTimeout {
                    timeout: self.timeout,
                });
            }
        };

        let outcome = ProcessOutcome {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(SIGNALLED_EXIT_CODE),
        };

        debug!(
            "Worker exited: exit_code={}, stdout_len={}, stderr_len={}",
            outcome.exit_code,
            outcome.stdout.len(),
            outcome.stderr.len()
        );

        Ok(outcome)
    }
}
