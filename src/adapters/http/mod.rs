//! HTTP adapters - REST API implementations.

pub mod questionnaire;

// Re-export key types for convenience
pub use questionnaire::{app_router, DownloadSettings, QuestionnaireAppState};
