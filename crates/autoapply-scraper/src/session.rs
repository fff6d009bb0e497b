//! Top-level scrape session controller.

use crate::auth::SessionAuthenticator;
use crate::discovery::DiscoveryLoop;
use crate::error::Result;
use crate::selectors::{ListingSelectors, LoginSelectors};
use autoapply_browser::{diagnostics, BrowserProvider, ChromiumProvider, PageDriver};
use autoapply_core::{JobListing, JobSearchCriteria, ScraperConfig};

/// One scraping session from browser-open to browser-close.
///
/// The controller exclusively owns the browser session: it is the only
/// component that acquires or closes it, and it guarantees release on every
/// exit path. Concurrent searches each launch their own browser; session
/// state (auth cookies, pane selection) must never cross-contaminate.
pub struct JobScraper {
    config: ScraperConfig,
    selectors: ListingSelectors,
    login_selectors: LoginSelectors,
    provider: Box<dyn BrowserProvider>,
}

impl JobScraper {
    #[must_use]
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            selectors: ListingSelectors::default(),
            login_selectors: LoginSelectors::default(),
            provider: Box::new(ChromiumProvider),
        }
    }

    /// Substitute the browser provider behind the session lifecycle.
    #[must_use]
    pub fn with_provider(mut self, provider: Box<dyn BrowserProvider>) -> Self {
        self.provider = provider;
        self
    }

    /// Override the default site selectors.
    #[must_use]
    pub fn with_selectors(
        mut self,
        selectors: ListingSelectors,
        login_selectors: LoginSelectors,
    ) -> Self {
        self.selectors = selectors;
        self.login_selectors = login_selectors;
        self
    }

    /// Search for job listings.
    ///
    /// Returns between 0 and `limit` deduplicated listings in discovery
    /// order. "Found nothing" is an empty `Ok`, never an error; the only
    /// hard failure is [`ScrapeError::Authentication`] when credentials
    /// were configured and didn't work. Any other mid-session fault
    /// degrades to whatever listings had accumulated.
    pub async fn search(
        &self,
        criteria: &JobSearchCriteria,
        limit: usize,
    ) -> Result<Vec<JobListing>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let session = self.provider.acquire(self.config.headless).await?;
        let outcome = self.search_on_page(session.page(), criteria, limit).await;
        if let Err(e) = session.close().await {
            // Drop still kills the child process; log and move on
            tracing::warn!("Browser teardown failed: {}", e);
        }
        outcome
    }

    /// Run the authenticate-then-discover workflow against an already-open
    /// page. The caller owns the page's lifetime; this is the seam the
    /// deterministic fake-page tests drive.
    pub async fn search_on_page(
        &self,
        page: &dyn PageDriver,
        criteria: &JobSearchCriteria,
        limit: usize,
    ) -> Result<Vec<JobListing>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        if self.config.credentials.is_configured() {
            SessionAuthenticator::new(page, &self.config, &self.login_selectors)
                .login()
                .await?;
        } else {
            tracing::debug!("No credentials configured; skipping authentication");
        }

        let mut listings = Vec::new();
        let discovery = DiscoveryLoop::new(page, &self.selectors, &self.config);
        match discovery.collect(criteria, limit, &mut listings).await {
            Ok(()) => Ok(listings),
            Err(e) => {
                // Unexpected mid-discovery failure: keep what we have
                tracing::error!(
                    "Discovery aborted after {} listings: {}",
                    listings.len(),
                    e
                );
                diagnostics::capture_snapshot(page, "discovery-failure").await;
                Ok(listings)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_limit_short_circuits() {
        // limit = 0 returns before any browser is launched
        let scraper = JobScraper::new(ScraperConfig::default());
        let criteria = JobSearchCriteria::new("rust", None).expect("valid");
        let result = scraper.search(&criteria, 0).await.expect("ok");
        assert!(result.is_empty());
    }
}
