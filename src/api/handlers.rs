use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::data_models::SearchResult;
use crate::error::ScrapeError;
use crate::pipeline::ListingScraper;

use super::models::{ErrorBody, ScrapeParams};

const SCRAPE_FAILED: &str =
    "Failed to fetch or parse the search page. Check the network and whether the site blocked the request.";

/// `GET /api/scrape?keyword=...`
///
/// If the client hangs up mid-request the handler future is dropped, which
/// abandons the upstream fetch along with it.
pub async fn scrape_handler(
    State(scraper): State<Arc<ListingScraper>>,
    params: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params.map_err(|e| ScrapeError::InvalidQuery(e.body_text()))?;
    let keyword = params.keyword.unwrap_or_default();
    let result = scraper.search(&keyword).await?;
    Ok(Json(result))
}

#[derive(Debug)]
pub struct ApiError(pub ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let (status, body) = match self.0 {
            ScrapeError::Validation => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: ScrapeError::Validation.to_string(),
                    code,
                    details: None,
                },
            ),
            e @ ScrapeError::InvalidQuery(_) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: e.to_string(),
                    code,
                    details: None,
                },
            ),
            e @ (ScrapeError::Fetch(_) | ScrapeError::Parse(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: SCRAPE_FAILED.to_string(),
                    code,
                    details: Some(e.to_string()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
