//! Plain-text extraction from uploaded resume PDFs.

use crate::error::{ResumeError, Result};

/// Extracts plain text from PDF bytes.
pub trait PdfTextExtractor: Send + Sync {
    /// Extract the document's text content.
    ///
    /// # Errors
    /// Returns [`ResumeError::PdfParse`] for malformed PDFs or documents
    /// with no extractable text (scanned images, for example).
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String>;
}

/// [`PdfTextExtractor`] backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfTextExtractor for PdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(pdf_bytes)
            .map_err(|e| ResumeError::PdfParse(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ResumeError::PdfParse(
                "document contains no extractable text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let result = PdfExtractor.extract_text(b"definitely not a pdf");
        assert!(matches!(result, Err(ResumeError::PdfParse(_))));
    }

    #[test]
    fn test_empty_input_is_a_parse_error() {
        let result = PdfExtractor.extract_text(&[]);
        assert!(matches!(result, Err(ResumeError::PdfParse(_))));
    }
}
