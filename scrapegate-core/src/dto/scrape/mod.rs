//! Scrape endpoint response DTOs

use serde::{Deserialize, Serialize};

use crate::domain::scrape::JobRecord;

/// Message attached to every successful response
pub const SUCCESS_MESSAGE: &str = "Scraping completed successfully";

/// Envelope returned for every scrape request
///
/// Success: `{"success": true, "message": ..., "data": {...}}`.
/// Failure: `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ScrapeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeResponse {
    pub fn completed(data: ScrapeData) -> Self {
        Self {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of a successful scrape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeData {
    pub total_jobs: usize,
    /// CSV artifact path relative to the orchestrator base directory
    pub csv_file: String,
    /// JSON artifact path relative to the orchestrator base directory
    pub json_file: String,
    pub jobs: Vec<JobRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_completed_shape() {
        let response = ScrapeResponse::completed(ScrapeData {
            total_jobs: 1,
            csv_file: "results/jobs_x.csv".to_string(),
            json_file: "results/jobs_x.json".to_string(),
            jobs: vec![json!({"job_title": "Engineer"})],
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "message": "Scraping completed successfully",
                "data": {
                    "total_jobs": 1,
                    "csv_file": "results/jobs_x.csv",
                    "json_file": "results/jobs_x.json",
                    "jobs": [{"job_title": "Engineer"}]
                }
            })
        );
    }

    #[test]
    fn test_failed_shape() {
        let response = ScrapeResponse::failed("No data received");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "error": "No data received"})
        );
    }

    #[test]
    fn test_failed_deserializes_without_data() {
        let response: ScrapeResponse =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("boom"));
        assert!(response.data.is_none());
    }
}
