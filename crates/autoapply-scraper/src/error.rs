use autoapply_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Fatal to the session: login elements missing, or the post-login
    /// navigation signal never arrived. The only error that crosses the
    /// request boundary as a hard failure.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Per-item failure; isolated by the discovery loop, never aborts a
    /// session.
    #[error("extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::Authentication {
            reason: "submit button missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "authentication failed: submit button missing"
        );
    }

    #[test]
    fn test_browser_error_converts() {
        let err: ScrapeError = BrowserError::Timeout("div.card".to_string()).into();
        assert!(matches!(err, ScrapeError::Browser(_)));
    }
}
