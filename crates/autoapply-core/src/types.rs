//! Domain types shared across the AutoApply workspace.
//!
//! These are the values exchanged at every crate seam: search input,
//! scraped listings, and the structured resume produced by the optimizer.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Sentinel used for required listing fields that could not be extracted.
///
/// The target site's markup drifts; a listing with an unknown company is
/// still worth returning. Optional fields use `None` instead.
pub const UNKNOWN_FIELD: &str = "unknown";

/// Search input for one scraping session.
///
/// Immutable once constructed; `keywords` is validated to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSearchCriteria {
    keywords: String,
    location: Option<String>,
}

impl JobSearchCriteria {
    /// Create search criteria.
    ///
    /// # Errors
    /// Returns error if `keywords` is empty or whitespace-only.
    pub fn new(
        keywords: impl Into<String>,
        location: Option<String>,
    ) -> Result<Self, CoreError> {
        let keywords = keywords.into();
        if keywords.trim().is_empty() {
            return Err(CoreError::Validation(
                "keywords must not be empty".to_string(),
            ));
        }
        let location = location.filter(|l| !l.trim().is_empty());
        Ok(Self { keywords, location })
    }

    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// One scraped job posting.
///
/// `job_url` is the canonical absolute URL and uniquely identifies a listing
/// within a session; result collections never contain two entries with the
/// same `job_url`. Posted date and salary stay opaque strings because the
/// source site exposes no structured values for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_url: String,
    pub description_snippet: Option<String>,
    pub posted_date: Option<String>,
    pub salary_range: Option<String>,
}

/// One section of a tailored resume (e.g. an experience entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSection {
    pub heading: String,
    /// Subheading, e.g. company and date range for an experience entry.
    #[serde(default)]
    pub subheading: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Structured, ATS-friendly resume produced by the optimizer and consumed
/// by the document renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoredResume {
    pub full_name: String,
    #[serde(default)]
    pub contact_line: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ResumeSection>,
    #[serde(default)]
    pub education: Vec<ResumeSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_requires_keywords() {
        assert!(JobSearchCriteria::new("", None).is_err());
        assert!(JobSearchCriteria::new("   ", None).is_err());
        assert!(JobSearchCriteria::new("rust engineer", None).is_ok());
    }

    #[test]
    fn test_criteria_drops_blank_location() {
        let criteria =
            JobSearchCriteria::new("rust engineer", Some("  ".to_string())).expect("valid");
        assert_eq!(criteria.location(), None);

        let criteria =
            JobSearchCriteria::new("rust engineer", Some("Berlin".to_string())).expect("valid");
        assert_eq!(criteria.location(), Some("Berlin"));
    }

    #[test]
    fn test_listing_serde_roundtrip() {
        let listing = JobListing {
            title: "Systems Engineer".to_string(),
            company: UNKNOWN_FIELD.to_string(),
            location: "Remote".to_string(),
            job_url: "https://example.com/jobs/1".to_string(),
            description_snippet: Some("Build things".to_string()),
            posted_date: None,
            salary_range: Some("$120k-$150k".to_string()),
        };

        let json = serde_json::to_string(&listing).expect("serialize");
        let back: JobListing = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(listing, back);
    }

    #[test]
    fn test_tailored_resume_defaults() {
        let json = r#"{"full_name": "Ada Lovelace"}"#;
        let resume: TailoredResume = serde_json::from_str(json).expect("deserialize");
        assert_eq!(resume.full_name, "Ada Lovelace");
        assert!(resume.skills.is_empty());
        assert!(resume.experience.is_empty());
    }
}
