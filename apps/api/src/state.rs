use std::sync::Arc;

use crate::pipeline::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume pipeline. Its document source is chosen at startup.
    pub parser: Arc<ResumeParser>,
}
