//! Scrape-related API endpoints

use crate::ScrapeClient;
use crate::error::Result;
use scrapegate_core::domain::scrape::ScrapeRequest;
use scrapegate_core::dto::scrape::ScrapeData;

impl ScrapeClient {
    /// Run a scrape and wait for its results
    ///
    /// # Arguments
    /// * `request` - Job board, location and optional filters
    ///
    /// # Returns
    /// The collected jobs and the artifact paths on the server
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeData> {
        let url = format!("{}/api/scrape", self.base_url);
        tracing::debug!(
            "Requesting scrape of {} in {}",
            request.job_board,
            request.location
        );

        let response = self.client.post(&url).json(request).send().await?;

        self.handle_scrape_response(response).await
    }

    /// Check that the orchestrator is up
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
