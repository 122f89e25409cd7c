//! Scrape request domain types

use serde::{Deserialize, Serialize};

/// A single record produced by the worker
///
/// The schema is owned by the worker; the orchestrator only forwards it.
pub type JobRecord = serde_json::Value;

/// A validated request to run the worker
///
/// Serialized with the camelCase keys used on the wire
/// (`jobBoard`, `location`, `keywords`, `maxPages`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    pub job_board: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

impl ScrapeRequest {
    pub fn new(job_board: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            job_board: job_board.into(),
            location: location.into(),
            keywords: None,
            max_pages: None,
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Keywords, if any were given and they are not empty
    pub fn search_keywords(&self) -> Option<&str> {
        self.keywords.as_deref().filter(|k| !k.is_empty())
    }
}
