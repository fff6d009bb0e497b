//! Resume tailoring endpoints.
//!
//! The upload endpoints take multipart form data with two parts: a
//! `resume_file` PDF and a `job_description` text field.

use crate::errors::AppError;
use crate::state::AppState;
use autoapply_core::TailoredResume;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ImproveResumeResponse {
    pub improved_resume: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

/// POST /api/improve-resume
///
/// Free-text rewrite of the uploaded resume against the job description.
pub async fn improve_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImproveResumeResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let resume_text = state.pdf.extract_text(&upload.pdf_bytes)?;

    let improved_resume = state
        .optimizer
        .improve(&resume_text, &upload.job_description)
        .await?;

    Ok(Json(ImproveResumeResponse { improved_resume }))
}

/// POST /api/optimize-resume
///
/// Structured, ATS-friendly rewrite of the uploaded resume.
pub async fn optimize_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TailoredResume>, AppError> {
    let upload = read_upload(multipart).await?;
    let resume_text = state.pdf.extract_text(&upload.pdf_bytes)?;

    let resume = state
        .optimizer
        .optimize(&resume_text, &upload.job_description)
        .await?;

    Ok(Json(resume))
}

/// POST /api/resume-suggestions
///
/// Concrete improvement suggestions for the uploaded resume.
pub async fn resume_suggestions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let resume_text = state.pdf.extract_text(&upload.pdf_bytes)?;

    let suggestions = state
        .optimizer
        .suggestions(&resume_text, &upload.job_description)
        .await?;

    Ok(Json(SuggestionsResponse { suggestions }))
}

/// POST /api/render-resume
///
/// Renders a structured resume to a downloadable PDF.
pub async fn render_resume(
    State(state): State<AppState>,
    Json(resume): Json<TailoredResume>,
) -> Result<impl IntoResponse, AppError> {
    if resume.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "full_name must not be empty".to_string(),
        ));
    }

    let pdf_bytes = state.renderer.render_pdf(&resume).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"".to_string(),
            ),
        ],
        pdf_bytes,
    ))
}

struct ResumeUpload {
    pdf_bytes: Bytes,
    job_description: String,
}

/// Pull the resume PDF and job description out of a multipart request.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut pdf_bytes: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        // Take owned copies up front; reading the body consumes the field
        let name = field.name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);

        match name.as_deref() {
            Some("resume_file") => {
                validate_content_type(content_type.as_deref())?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read upload: {e}")))?;
                pdf_bytes = Some(bytes);
            }
            Some("job_description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read field: {e}")))?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let pdf_bytes = pdf_bytes
        .ok_or_else(|| AppError::Validation("resume_file part is required".to_string()))?;
    let job_description = job_description
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description must not be empty".to_string()))?;

    Ok(ResumeUpload {
        pdf_bytes,
        job_description,
    })
}

fn validate_content_type(content_type: Option<&str>) -> Result<(), AppError> {
    match content_type {
        Some("application/pdf") => Ok(()),
        other => Err(AppError::Validation(format!(
            "invalid file type {}; please upload a PDF",
            other.unwrap_or("unknown")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_must_be_pdf() {
        assert!(validate_content_type(Some("application/pdf")).is_ok());
        assert!(validate_content_type(Some("text/plain")).is_err());
        assert!(validate_content_type(None).is_err());
    }
}
