use std::sync::Arc;

use crate::llm_client::GeminiClient;
use crate::models::form::PersistenceStore;
use crate::models::resume::ResumeDocument;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    /// The candidate's stored resume; every optimization starts from this document.
    pub base_resume: ResumeDocument,
    /// Pluggable form-state persistence. Default: `FileStore` under `STATE_DIR`.
    pub form_store: Arc<dyn PersistenceStore>,
}
