//! Scrapegate Orchestrator
//!
//! Exposes a synchronous scrape endpoint: each request validates its input,
//! runs the scraper worker as a child process, and returns the job records
//! the worker wrote.
//!
//! Layers:
//! - `api`: axum router, handlers and response envelopes
//! - `service`: the request pipeline (validation, naming, command building,
//!   execution, collection)
//! - `config`, `diagnostics`, `error`: ambient concerns shared by both

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::ScrapeError;
pub use service::ScrapeService;
