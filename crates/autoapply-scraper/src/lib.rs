//! AutoApply job-listing scraper.
//!
//! A stateful browser-automation workflow: authenticate against a login-gated
//! single-page application, discover listings through scroll/click
//! interactions, extract structured data from inconsistent markup, and
//! degrade gracefully on timeouts, layout drift and partial failures.
//!
//! The entry point is [`JobScraper::search`], which owns the browser for the
//! duration of one session and guarantees teardown on every exit path. All
//! page interaction goes through the `PageDriver` trait, so the whole
//! workflow can be exercised against a deterministic fake page.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod search_url;
pub mod selectors;
pub mod session;

pub use auth::SessionAuthenticator;
pub use discovery::DiscoveryLoop;
pub use error::{Result, ScrapeError};
pub use extract::ListingExtractor;
pub use search_url::{build_search_url, canonical_job_url};
pub use selectors::{ListingSelectors, LoginSelectors};
pub use session::JobScraper;
