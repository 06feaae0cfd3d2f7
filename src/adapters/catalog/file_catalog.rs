//! Filesystem loader for the question catalog.
//!
//! Accepts JSON (`.json`, or any unknown extension) and YAML (`.yaml`/`.yml`)
//! documents of the shape `{"questions": [ {...}, ... ]}`. Entry key order
//! is preserved in both formats.

use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use crate::domain::foundation::ValidationError;
use crate::domain::questionnaire::QuestionCatalog;

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse catalog {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}

enum CatalogSyntax {
    Json,
    Yaml,
}

impl CatalogSyntax {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => CatalogSyntax::Yaml,
            _ => CatalogSyntax::Json,
        }
    }
}

/// Parses catalog text in the syntax implied by `path`.
pub fn parse_catalog(path: &Path, raw: &str) -> Result<QuestionCatalog, CatalogLoadError> {
    let parse_error = |message: String| CatalogLoadError::Parse {
        path: path.display().to_string(),
        message,
    };

    let document: serde_json::Value = match CatalogSyntax::from_path(path) {
        CatalogSyntax::Json => serde_json::from_str(raw).map_err(|e| parse_error(e.to_string()))?,
        CatalogSyntax::Yaml => serde_yaml::from_str(raw).map_err(|e| parse_error(e.to_string()))?,
    };

    Ok(QuestionCatalog::from_value(&document)?)
}

/// Reads and validates the catalog at `path`.
///
/// Persistence keys shared by several questions are allowed but logged,
/// since the later answer overwrites the earlier one.
pub async fn load_catalog(path: &Path) -> Result<QuestionCatalog, CatalogLoadError> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|e| CatalogLoadError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let catalog = parse_catalog(path, &raw)?;

    for answer_type in catalog.shared_answer_types() {
        warn!(
            answer_type,
            "Several questions share a persistence key; later answers overwrite earlier ones"
        );
    }
    info!(path = %path.display(), questions = catalog.len(), "Loaded question catalog");

    Ok(catalog)
}
