//! Diagnostic page snapshots for postmortem debugging.
//!
//! Captures are best-effort side effects: a failure to write a snapshot is
//! logged and swallowed, never surfaced to the request.

use crate::page::PageDriver;
use autoapply_core::AppConfig;
use std::path::PathBuf;

/// Capture a screenshot of the page and write it under the app data dir.
///
/// Returns the written path, or `None` if the capture or write failed.
pub async fn capture_snapshot(page: &dyn PageDriver, label: &str) -> Option<PathBuf> {
    let bytes = match page.screenshot().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Diagnostic screenshot failed ({}): {}", label, e);
            return None;
        }
    };

    let dir = match AppConfig::data_dir() {
        Ok(dir) => dir.join("diagnostics"),
        Err(e) => {
            tracing::warn!("No data dir for diagnostics: {}", e);
            return None;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("Could not create diagnostics dir: {}", e);
        return None;
    }

    let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let path = dir.join(format!("{label}-{timestamp}.png"));

    match std::fs::write(&path, bytes) {
        Ok(()) => {
            tracing::info!("Diagnostic snapshot written to {}", path.display());
            Some(path)
        }
        Err(e) => {
            tracing::warn!("Could not write diagnostic snapshot: {}", e);
            None
        }
    }
}
