//! Document adapters - Template rendering and artifact storage.
//!
//! This module provides adapters for the document-related ports:
//! - `DocxRenderer` - Fills placeholders inside `.docx` archives
//! - `PlainTextRenderer` - Fills placeholders in UTF-8 text templates
//! - `LocalArtifactStorage` - Reads and writes artifacts on the local filesystem

mod docx_renderer;
mod local_artifact_storage;
mod text_renderer;

use std::sync::Arc;

use crate::domain::document::TemplateFormat;
use crate::ports::TemplateRenderer;

pub use docx_renderer::DocxRenderer;
pub use local_artifact_storage::LocalArtifactStorage;
pub use text_renderer::PlainTextRenderer;

/// Picks the renderer for a template format.
pub fn renderer_for(format: TemplateFormat) -> Arc<dyn TemplateRenderer> {
    match format {
        TemplateFormat::Docx => Arc::new(DocxRenderer::new()),
        TemplateFormat::PlainText => Arc::new(PlainTextRenderer::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_matches_requested_format() {
        assert_eq!(renderer_for(TemplateFormat::Docx).format(), TemplateFormat::Docx);
        assert_eq!(
            renderer_for(TemplateFormat::PlainText).format(),
            TemplateFormat::PlainText
        );
    }
}
