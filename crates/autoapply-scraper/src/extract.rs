//! Field extraction from a loaded detail pane.

use crate::error::Result;
use crate::selectors::ListingSelectors;
use autoapply_browser::PageDriver;
use autoapply_core::{JobListing, UNKNOWN_FIELD};
use std::time::Duration;

/// Maximum snippet length before truncation.
pub const MAX_SNIPPET_CHARS: usize = 300;

/// Visible-text cues that mark a posted-date element.
pub const POSTED_DATE_CUES: &[&str] = &["ago", "posted", "today", "yesterday", "reposted"];

/// Visible-text cues that mark a salary element.
pub const SALARY_CUES: &[&str] = &["$", "€", "£", "/yr", "/hr", "per year", "per hour", "k/yr"];

/// Best-effort extractor for the detail pane of one selected listing.
///
/// Each field is looked up independently with its own short timeout; a
/// missing or slow field degrades to the `"unknown"` sentinel (required
/// fields) or `None` (optional fields) instead of aborting the rest.
/// Partial data beats no data.
pub struct ListingExtractor<'a> {
    selectors: &'a ListingSelectors,
    field_timeout: Duration,
}

impl<'a> ListingExtractor<'a> {
    #[must_use]
    pub fn new(selectors: &'a ListingSelectors, field_timeout: Duration) -> Self {
        Self {
            selectors,
            field_timeout,
        }
    }

    /// Extract a listing from the currently rendered detail pane.
    ///
    /// Returns `Ok(None)` if the pane container itself never appeared within
    /// its timeout; absence, not an error, so the discovery loop can skip
    /// and continue.
    pub async fn extract(
        &self,
        page: &dyn PageDriver,
        job_url: String,
    ) -> Result<Option<JobListing>> {
        if page
            .wait_for_selector(&self.selectors.detail_pane, self.field_timeout)
            .await
            .is_err()
        {
            tracing::debug!("Detail pane never rendered for {}", job_url);
            return Ok(None);
        }

        let title = self.required_field(page, &self.selectors.title).await;
        let company = self.required_field(page, &self.selectors.company).await;
        let location = self.required_field(page, &self.selectors.location).await;

        let description_snippet = self
            .optional_field(page, &self.selectors.description)
            .await
            .map(|text| truncate_snippet(&text));

        let posted_date = self.cue_field(page, POSTED_DATE_CUES).await;
        let salary_range = self.cue_field(page, SALARY_CUES).await;

        Ok(Some(JobListing {
            title,
            company,
            location,
            job_url,
            description_snippet,
            posted_date,
            salary_range,
        }))
    }

    /// Required fields fall back to the sentinel on any miss or error.
    async fn required_field(&self, page: &dyn PageDriver, selector: &str) -> String {
        match page.text_of(selector, self.field_timeout).await {
            Ok(Some(text)) => text,
            Ok(None) => UNKNOWN_FIELD.to_string(),
            Err(e) => {
                tracing::debug!("Field lookup failed for {}: {}", selector, e);
                UNKNOWN_FIELD.to_string()
            }
        }
    }

    async fn optional_field(&self, page: &dyn PageDriver, selector: &str) -> Option<String> {
        match page.text_of(selector, self.field_timeout).await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Field lookup failed for {}: {}", selector, e);
                None
            }
        }
    }

    async fn cue_field(&self, page: &dyn PageDriver, cues: &[&str]) -> Option<String> {
        match page
            .text_matching(&self.selectors.meta_text, cues, self.field_timeout)
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Cue lookup failed: {}", e);
                None
            }
        }
    }
}

/// Truncate to [`MAX_SNIPPET_CHARS`] characters with an ellipsis marker,
/// respecting char boundaries.
fn truncate_snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_SNIPPET_CHARS).collect();
    out.push('…');
    out
}
