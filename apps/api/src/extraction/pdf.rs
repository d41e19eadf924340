use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::debug;

use super::{ExtractionError, TextExtractor};

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with an embedded text layer; scanned pages come back empty.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        // pdf-extract panics on some malformed inputs instead of returning Err.
        let result = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }))
        .map_err(|_| ExtractionError::PdfParsing("parser aborted on malformed input".to_string()))?;

        let pages = result.map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
        debug!("Extracted {} page(s) from {} bytes", pages.len(), bytes.len());
        Ok(pages)
    }
}
