//! Request validation
//!
//! Turns a raw request body into a `ScrapeRequest`. Only the shape of the
//! request is checked here; whether a job board or location is meaningful is
//! for the worker to decide.

use scrapegate_core::domain::scrape::ScrapeRequest;
use serde_json::{Map, Value};

use crate::error::{Result, ScrapeError};

/// Parses and validates a raw request body
pub fn validate_request(body: &[u8]) -> Result<ScrapeRequest> {
    if body.is_empty() {
        return Err(ScrapeError::MalformedInput("No data received".to_string()));
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ScrapeError::MalformedInput(format!("Invalid JSON: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(ScrapeError::MalformedInput(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let job_board = string_field(&fields, "jobBoard")?;
    let location = string_field(&fields, "location")?;

    let missing: Vec<&'static str> = [("jobBoard", &job_board), ("location", &location)]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| key)
        .collect();

    let (Some(job_board), Some(location)) = (job_board, location) else {
        return Err(ScrapeError::MissingParameter { missing });
    };

    Ok(ScrapeRequest {
        job_board,
        location,
        keywords: string_field(&fields, "keywords")?,
        max_pages: optional_page_count(&fields, "maxPages")?,
    })
}

/// `Ok(None)` when the key is absent or null
fn string_field(fields: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ScrapeError::MalformedInput(format!(
            "{} must be a string",
            key
        ))),
    }
}

fn optional_page_count(fields: &Map<String, Value>, key: &str) -> Result<Option<u32>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .filter(|pages| *pages >= 1)
            .and_then(|pages| u32::try_from(pages).ok())
            .map(Some)
            .ok_or_else(|| {
                ScrapeError::MalformedInput(format!("{} must be a positive integer", key))
            }),
        Some(_) => Err(ScrapeError::MalformedInput(format!(
            "{} must be a positive integer",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body() {
        let err = validate_request(b"").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedInput(_)));
        assert!(err.to_string().contains("No data received"));
    }

    #[test]
    fn test_invalid_json() {
        let err = validate_request(b"{not json").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedInput(_)));
        assert!(err.to_string().starts_with("Invalid JSON:"));
    }

    #[test]
    fn test_non_object_body() {
        let err = validate_request(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedInput(_)));
    }

    #[test]
    fn test_missing_job_board() {
        let err = validate_request(br#"{"location": "Cape Town"}"#).unwrap_err();
        match err {
            ScrapeError::MissingParameter { missing } => assert_eq!(missing, vec!["jobBoard"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_both() {
        let err = validate_request(br#"{"keywords": "rust"}"#).unwrap_err();
        match err {
            ScrapeError::MissingParameter { missing } => {
                assert_eq!(missing, vec!["jobBoard", "location"])
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = validate_request(br#"{"jobBoard": "pnet", "location": null}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingParameter { .. }));
    }

    #[test]
    fn test_valid_with_empty_keywords() {
        let req = validate_request(
            br#"{"jobBoard": "careers24", "location": "Johannesburg", "keywords": ""}"#,
        )
        .unwrap();

        assert_eq!(req.job_board, "careers24");
        assert_eq!(req.location, "Johannesburg");
        assert_eq!(req.keywords.as_deref(), Some(""));
        assert_eq!(req.search_keywords(), None);
        assert_eq!(req.max_pages, None);
    }

    #[test]
    fn test_presence_suffices() {
        let req = validate_request(br#"{"jobBoard": "", "location": ""}"#).unwrap();
        assert_eq!(req.job_board, "");
        assert_eq!(req.location, "");
    }

    #[test]
    fn test_non_string_parameter() {
        let err = validate_request(br#"{"jobBoard": 7, "location": "Durban"}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedInput(_)));
        assert_eq!(err.to_string(), "jobBoard must be a string");
    }

    #[test]
    fn test_max_pages() {
        let req =
            validate_request(br#"{"jobBoard": "indeed", "location": "Durban", "maxPages": 3}"#)
                .unwrap();
        assert_eq!(req.max_pages, Some(3));

        for bad in [
            br#"{"jobBoard": "indeed", "location": "Durban", "maxPages": 0}"#.as_slice(),
            br#"{"jobBoard": "indeed", "location": "Durban", "maxPages": -1}"#.as_slice(),
            br#"{"jobBoard": "indeed", "location": "Durban", "maxPages": 1.5}"#.as_slice(),
            br#"{"jobBoard": "indeed", "location": "Durban", "maxPages": "2"}"#.as_slice(),
        ] {
            let err = validate_request(bad).unwrap_err();
            assert!(matches!(err, ScrapeError::MalformedInput(_)));
        }
    }
}
