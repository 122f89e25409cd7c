//! Scrape API Handler

use axum::{Json, body::Bytes, extract::State};
use scrapegate_core::dto::scrape::ScrapeResponse;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::response;
use crate::service::ScrapeService;

/// POST /api/scrape
/// Run the worker for the requested job board and location, and return what it collected
///
/// The body is taken raw so that empty or undecodable input is reported in the
/// same error envelope as every other failure.
pub async fn scrape(
    State(service): State<Arc<ScrapeService>>,
    body: Bytes,
) -> ApiResult<Json<ScrapeResponse>> {
    tracing::debug!("Scrape request received ({} bytes)", body.len());

    let run = service.scrape(&body).await?;

    Ok(Json(response::success(run)))
}
