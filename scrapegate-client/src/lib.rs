//! Scrapegate HTTP Client
//!
//! A small, type-safe HTTP client for the scrapegate orchestrator API.
//!
//! # Example
//!
//! ```no_run
//! use scrapegate_client::ScrapeClient;
//! use scrapegate_core::domain::scrape::ScrapeRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScrapeClient::new("http://localhost:8080");
//!
//!     let request = ScrapeRequest::new("careers24", "Cape Town").with_keywords("developer");
//!     let data = client.scrape(&request).await?;
//!
//!     println!("Collected {} jobs into {}", data.total_jobs, data.json_file);
//!     Ok(())
//! }
//! ```

pub mod error;
mod scrape;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use scrapegate_core::dto::scrape::ScrapeData;

use reqwest::Client;
use scrapegate_core::dto::scrape::ScrapeResponse;

/// HTTP client for the scrapegate orchestrator API
#[derive(Debug, Clone)]
pub struct ScrapeClient {
    /// Base URL of the orchestrator (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ScrapeClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// Scrapes block until the worker finishes, so a configured client with a
    /// generous timeout is usually what callers want here.
    ///
    /// # Example
    /// ```
    /// use scrapegate_client::ScrapeClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(600))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ScrapeClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read a scrape response envelope
    async fn handle_scrape_response(&self, response: reqwest::Response) -> Result<ScrapeData> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        interpret_scrape_response(status, &body)
    }

    /// Check the status of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

/// Maps a status code and body to the scrape result
///
/// The envelope wins over the status code: a body that decodes as a failed
/// `ScrapeResponse` becomes `ScrapeFailed` with the server's message.
fn interpret_scrape_response(status: u16, body: &str) -> Result<ScrapeData> {
    match serde_json::from_str::<ScrapeResponse>(body) {
        Ok(ScrapeResponse {
            success: true,
            data: Some(data),
            ..
        }) => Ok(data),
        Ok(ScrapeResponse {
            success: true,
            data: None,
            ..
        }) => Err(ClientError::ParseError(
            "Successful response carried no data".to_string(),
        )),
        Ok(ScrapeResponse { error, .. }) => Err(ClientError::ScrapeFailed(
            error.unwrap_or_else(|| "Unknown error".to_string()),
        )),
        Err(_) if !(200..300).contains(&status) => Err(ClientError::api_error(status, body)),
        Err(e) => Err(ClientError::ParseError(format!(
            "Failed to parse JSON response: {}",
            e
        ))),
    }
}
