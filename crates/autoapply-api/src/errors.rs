use autoapply_resume::ResumeError;
use autoapply_scraper::ScrapeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials were supplied and didn't work; the one scraper fault
    /// that surfaces as a hard failure.
    #[error("Authentication against the job site failed: {0}")]
    SiteAuthentication(String),

    #[error("Scrape failed: {0}")]
    Scrape(String),

    #[error("Resume processing failed: {0}")]
    Resume(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SiteAuthentication(msg) => (
                StatusCode::BAD_GATEWAY,
                "SITE_AUTHENTICATION_FAILED",
                msg.clone(),
            ),
            AppError::Scrape(msg) => (StatusCode::BAD_GATEWAY, "SCRAPE_FAILED", msg.clone()),
            AppError::Resume(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "RESUME_PROCESSING_FAILED",
                msg.clone(),
            ),
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": { "code": code, "message": message }
        }));

        (status, body).into_response()
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::Authentication { reason } => AppError::SiteAuthentication(reason),
            other => AppError::Scrape(other.to_string()),
        }
    }
}

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::PdfParse(reason) => {
                AppError::Validation(format!("could not read the PDF: {reason}"))
            }
            other => AppError::Resume(other.to_string()),
        }
    }
}
