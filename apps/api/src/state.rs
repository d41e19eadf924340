use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: PdfTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Latest analysis per session, overwritten on re-analysis.
    pub sessions: SessionStore,
}
