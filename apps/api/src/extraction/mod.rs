//! Text extraction: turns uploaded document bytes into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default is `PdfTextExtractor`.

pub mod pdf;

use thiserror::Error;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),
}

/// Extracts ordered plain text from a paged document.
pub trait TextExtractor: Send + Sync {
    /// Returns the text of every page in order.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;

    /// Page texts joined with a newline, trimmed at both ends.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let pages = self.extract_pages(bytes)?;
        Ok(join_pages(&pages))
    }
}

pub fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}
