//! Plain-text Renderer - Fills `{{key}}` placeholders in UTF-8 templates.
//!
//! Paragraphs are blocks separated by blank (or whitespace-only) lines;
//! separators are copied through byte for byte.

use crate::domain::document::{placeholders, TemplateFormat};
use crate::domain::questionnaire::AnswerSet;
use crate::ports::{RenderError, TemplateRenderer};

/// Renderer for plain-text templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlainTextRenderer {
    fn format(&self) -> TemplateFormat {
        TemplateFormat::PlainText
    }

    fn render(&self, template: &[u8], answers: &AnswerSet) -> Result<Vec<u8>, RenderError> {
        let text = std::str::from_utf8(template).map_err(|e| RenderError::Encoding(e.to_string()))?;

        let mut output = String::with_capacity(text.len());
        let mut block_start = 0;
        let mut position = 0;

        for line in text.split_inclusive('\n') {
            let line_end = position + line.len();
            if line.trim().is_empty() {
                output.push_str(&placeholders::substitute(&text[block_start..position], answers));
                output.push_str(line);
                block_start = line_end;
            }
            position = line_end;
        }
        output.push_str(&placeholders::substitute(&text[block_start..], answers));

        Ok(output.into_bytes())
    }
}
