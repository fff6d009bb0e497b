//! The scroll-click-extract-dedupe cycle.

use crate::error::{Result, ScrapeError};
use crate::extract::ListingExtractor;
use crate::search_url::{build_search_url, canonical_job_url};
use crate::selectors::ListingSelectors;
use autoapply_browser::PageDriver;
use autoapply_core::{JobListing, JobSearchCriteria, ScraperConfig};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// No-progress scroll cycles tolerated before the loop terminates.
const MAX_NO_PROGRESS_CYCLES: u32 = 1;

/// Heuristic pause after selecting a card, for the pane to swap content.
/// There is no observable condition for "pane now shows the clicked
/// listing"; the pane element itself persists across selections.
const PANE_SWAP_PAUSE: Duration = Duration::from_millis(800);

/// How long to poll for new cards after a scroll before re-measuring.
const SCROLL_SETTLE: Duration = Duration::from_millis(2_000);

/// Polling interval while waiting for lazy-loaded cards.
const SCROLL_POLL: Duration = Duration::from_millis(250);

/// Accumulates up to a requested number of deduplicated listings from the
/// results page.
///
/// Borrows the open page for the duration of one call; the session
/// controller owns the browser and its teardown. All session state (the
/// seen-URL set and the no-progress counter) lives on the stack of
/// [`DiscoveryLoop::collect`] and dies with it.
pub struct DiscoveryLoop<'a> {
    page: &'a dyn PageDriver,
    selectors: &'a ListingSelectors,
    config: &'a ScraperConfig,
}

impl<'a> DiscoveryLoop<'a> {
    #[must_use]
    pub fn new(
        page: &'a dyn PageDriver,
        selectors: &'a ListingSelectors,
        config: &'a ScraperConfig,
    ) -> Self {
        Self {
            page,
            selectors,
            config,
        }
    }

    /// Collect up to `limit` deduplicated listings into `out`.
    ///
    /// Listings land in `out` in discovery (render) order. A result shorter
    /// than `limit` is a valid, non-error outcome; exhausting the results
    /// is detected as a scroll cycle that yields nothing new. Per-item
    /// failures are logged and skipped. `out` is an out-parameter so the
    /// caller keeps whatever accumulated if an unexpected error aborts the
    /// loop mid-way.
    pub async fn collect(
        &self,
        criteria: &JobSearchCriteria,
        limit: usize,
        out: &mut Vec<JobListing>,
    ) -> Result<()> {
        let search_url = build_search_url(&self.config.search_url, criteria);
        tracing::info!("Navigating to {}", search_url);
        self.page.goto(&search_url).await?;

        // Listings are lazily rendered and the provider is slow; a timeout
        // here means zero results, not a failure.
        if self
            .page
            .wait_for_selector(
                &self.selectors.card,
                Duration::from_millis(self.config.results_timeout_ms),
            )
            .await
            .is_err()
        {
            tracing::warn!("Timed out waiting for listings to render; treating as zero results");
            return Ok(());
        }

        let extractor = ListingExtractor::new(
            self.selectors,
            Duration::from_millis(self.config.field_timeout_ms),
        );

        let mut seen: HashSet<String> = HashSet::new();
        let mut no_progress: u32 = 0;

        loop {
            let collected_before_pass = out.len();
            let card_count = self.page.count(&self.selectors.card).await?;
            tracing::debug!("Pass over {} rendered cards", card_count);

            for index in 0..card_count {
                if out.len() >= limit {
                    break;
                }
                match self.visit_card(index, &extractor, &mut seen).await {
                    Ok(Some(listing)) => {
                        tracing::info!(
                            "Extracted: {} at {} ({}/{})",
                            listing.title,
                            listing.company,
                            out.len() + 1,
                            limit
                        );
                        out.push(listing);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        // Per-item faults never abort the session
                        tracing::warn!("Skipping listing {}: {}", index, e);
                    }
                }
            }

            if out.len() >= limit {
                break;
            }

            if out.len() == collected_before_pass {
                no_progress += 1;
                if no_progress >= MAX_NO_PROGRESS_CYCLES {
                    tracing::info!(
                        "No new listings after a scroll cycle; end of results at {}",
                        out.len()
                    );
                    break;
                }
            } else {
                no_progress = 0;
            }

            self.scroll_for_more(card_count).await?;
        }

        Ok(())
    }

    /// Resolve, select and extract a single card. `Ok(None)` means the card
    /// was a duplicate or its pane never rendered; nothing to record.
    async fn visit_card(
        &self,
        index: usize,
        extractor: &ListingExtractor<'_>,
        seen: &mut HashSet<String>,
    ) -> Result<Option<JobListing>> {
        let href = self
            .page
            .attr_of_descendant(&self.selectors.card, index, &self.selectors.card_link, "href")
            .await?
            .ok_or_else(|| ScrapeError::Extraction {
                url: format!("card #{index}"),
                reason: "listing link has no href".to_string(),
            })?;

        let page_url = self.page.current_url().await?;
        let job_url = canonical_job_url(&href, &page_url).ok_or_else(|| {
            ScrapeError::Extraction {
                url: href.clone(),
                reason: "href does not form a valid URL".to_string(),
            }
        })?;

        if seen.contains(&job_url) {
            tracing::debug!("Skipped duplicate {}", job_url);
            return Ok(None);
        }

        self.page.click_nth(&self.selectors.card, index).await?;
        tokio::time::sleep(PANE_SWAP_PAUSE).await;

        match extractor.extract(self.page, job_url.clone()).await? {
            Some(listing) => {
                // Mark seen only on success so a flaky pane gets another
                // chance on the next pass
                seen.insert(job_url);
                Ok(Some(listing))
            }
            None => Ok(None),
        }
    }

    /// Scroll the results container to its end and wait (bounded) for the
    /// card count to grow before the next pass re-measures.
    async fn scroll_for_more(&self, cards_before: usize) -> Result<()> {
        self.page
            .scroll_to_end(&self.selectors.results_container)
            .await?;

        let deadline = Instant::now() + SCROLL_SETTLE;
        loop {
            if self.page.count(&self.selectors.card).await? > cards_before {
                return Ok(());
            }
            if Instant::now() >= deadline {
                // Nothing new surfaced; the next pass decides termination
                return Ok(());
            }
            tokio::time::sleep(SCROLL_POLL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_tolerance_is_tight() {
        // The superseded fixed-scroll-count variant looped blindly; the
        // content-based design stops after a single empty cycle.
        assert_eq!(MAX_NO_PROGRESS_CYCLES, 1);
    }

    #[test]
    fn test_pauses_are_bounded() {
        assert!(PANE_SWAP_PAUSE < Duration::from_secs(2));
        assert!(SCROLL_SETTLE < Duration::from_secs(5));
        assert!(SCROLL_POLL < SCROLL_SETTLE);
    }
}
