//! Core domain types
//!
//! These types are shared between the orchestrator (which validates requests and
//! supervises the worker) and the client/CLI (which build requests and read results).

pub mod log;
pub mod run;
pub mod scrape;
