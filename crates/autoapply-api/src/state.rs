use autoapply_resume::{DocumentRenderer, PdfTextExtractor, ResumeOptimizer};
use autoapply_scraper::JobScraper;
use std::sync::Arc;

/// Shared application state handed to every handler.
///
/// Collaborators are trait objects so handlers never depend on a concrete
/// browser, PDF library or LLM provider.
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<JobScraper>,
    pub pdf: Arc<dyn PdfTextExtractor>,
    pub optimizer: Arc<dyn ResumeOptimizer>,
    pub renderer: Arc<dyn DocumentRenderer>,
    /// Listing count used when the caller omits `limit`
    pub default_limit: usize,
}
