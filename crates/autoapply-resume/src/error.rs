use autoapply_browser::BrowserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("could not read the PDF file: {0}")]
    PdfParse(String),

    #[error("no API key configured for the completion provider")]
    MissingApiKey,

    #[error("completion provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not parse provider response: {0}")]
    ResponseParse(String),

    #[error("rendering failed: {0}")]
    Render(#[from] BrowserError),
}

pub type Result<T> = std::result::Result<T, ResumeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResumeError::Provider {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("429"));
    }
}
