//! API Error Handling
//!
//! Converts orchestration failures into HTTP responses. Every failure is a
//! 500 carrying `{"success": false, "error": <message>}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;
use crate::error::ScrapeError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    Scrape(ScrapeError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // The scrape service has already logged the failure
            ApiError::Scrape(err) => (StatusCode::INTERNAL_SERVER_ERROR, response::failure(&err)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        ApiError::Scrape(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
