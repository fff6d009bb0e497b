//! Browser automation engine for JavaScript-heavy sites.
//!
//! Provides headless Chromium control behind the [`PageDriver`] trait so the
//! scraper depends on page capabilities (locate, click, wait) rather than a
//! concrete browser driver. Sessions get randomized fingerprints because the
//! target site varies behavior by client signature.

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod page;

pub use engine::{BrowserEngine, BrowserProvider, ChromiumProvider, SessionBrowser};
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use page::{CdpPage, PageDriver};
