//! Template formats understood by the document filler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Template format, chosen from the template's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// Office Open XML word-processing document.
    Docx,
    /// UTF-8 text; paragraphs are separated by blank lines.
    PlainText,
}

impl TemplateFormat {
    /// Detects the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("docx") => TemplateFormat::Docx,
            _ => TemplateFormat::PlainText,
        }
    }

    /// MIME type used when serving a filled document.
    pub fn content_type(&self) -> &'static str {
        match self {
            TemplateFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            TemplateFormat::PlainText => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFormat::Docx => write!(f, "docx"),
            TemplateFormat::PlainText => write!(f, "text"),
        }
    }
}
