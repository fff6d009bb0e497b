//! Job search endpoint.

use crate::errors::AppError;
use crate::state::AppState;
use autoapply_core::{JobListing, JobSearchCriteria};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    pub keywords: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchJobsQuery {
    pub limit: Option<usize>,
}

/// POST /api/search-jobs?limit=N
///
/// Runs one scraping session and returns the collected listings. An empty
/// collection maps to 404 here at the boundary; the scraper itself treats
/// "found nothing" as success.
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchJobsQuery>,
    Json(request): Json<SearchJobsRequest>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let criteria = JobSearchCriteria::new(request.keywords, request.location)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let limit = query.limit.unwrap_or(state.default_limit);

    let listings = state.scraper.search(&criteria, limit).await?;

    if listings.is_empty() {
        return Err(AppError::NotFound(
            "No jobs found matching your criteria".to_string(),
        ));
    }

    Ok(Json(listings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_without_location() {
        let request: SearchJobsRequest =
            serde_json::from_str(r#"{"keywords": "rust engineer"}"#).expect("deserialize");
        assert_eq!(request.keywords, "rust engineer");
        assert_eq!(request.location, None);
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let result = JobSearchCriteria::new("", None);
        assert!(result.is_err());
    }
}
