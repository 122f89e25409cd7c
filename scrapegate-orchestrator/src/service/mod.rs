//! Service Module
//!
//! Orchestration logic for scrape requests. Each submodule is one stage of the
//! request pipeline; `scrape` ties them together.

pub mod collector;
pub mod command;
pub mod context;
pub mod executor;
pub mod naming;
pub mod scrape;
pub mod validator;

// Re-export for convenience
pub use command::{CommandBuilder, WorkerCommand};
pub use context::ExecutionContext;
pub use executor::{ProcessExecutor, ProcessOutcome, WorkerExecutor};
pub use naming::{ArtifactNamer, RunArtifacts};
pub use scrape::{CompletedRun, ScrapeService};
