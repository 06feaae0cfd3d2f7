//! Template Renderer Port - Fills `{{key}}` placeholders in a template.

use thiserror::Error;

use crate::domain::document::TemplateFormat;
use crate::domain::questionnaire::AnswerSet;

/// Port for rendering a template with an answer set.
///
/// Rendering is pure: bytes in, bytes out. Reading and writing the files
/// is the caller's job.
pub trait TemplateRenderer: Send + Sync {
    /// The template format this renderer understands.
    fn format(&self) -> TemplateFormat;

    /// Replace every `{{key}}` token whose key is in `answers`.
    ///
    /// Tokens for unknown keys are left untouched.
    fn render(&self, template: &[u8], answers: &AnswerSet) -> Result<Vec<u8>, RenderError>;
}

/// Errors that can occur while rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template bytes are not in the expected container format.
    #[error("invalid template archive: {0}")]
    Archive(String),

    /// A document part could not be parsed or written.
    #[error("malformed document XML: {0}")]
    Xml(String),

    /// Template text is not valid UTF-8.
    #[error("template is not valid UTF-8: {0}")]
    Encoding(String),
}
