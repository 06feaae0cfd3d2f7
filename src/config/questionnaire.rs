//! Question catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionnaireConfig {
    /// Catalog file; `.yaml`/`.yml` is read as YAML, anything else as JSON
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl QuestionnaireConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("questionnaire.catalog_path"));
        }
        Ok(())
    }
}

impl Default for QuestionnaireConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("faq.json")
}
