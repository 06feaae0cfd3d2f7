//! Document generation configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::document::DocumentPaths;

use super::error::ValidationError;

/// Template, answers and output locations plus cleanup delays
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    /// Template containing `{{key}}` tokens
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Where the completed answer set is stored
    #[serde(default = "default_answers_path")]
    pub answers_path: PathBuf,

    /// Where the filled document is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// File name offered to clients on download
    #[serde(default = "default_download_name")]
    pub download_name: String,

    /// Seconds after a download before the output is deleted
    #[serde(default = "default_download_cleanup")]
    pub download_cleanup_secs: u64,

    /// Seconds after explicit generation before the output is deleted
    #[serde(default = "default_generate_cleanup")]
    pub generate_cleanup_secs: u64,
}

impl DocumentsConfig {
    pub fn paths(&self) -> DocumentPaths {
        DocumentPaths::new(self.template_path.clone(), self.output_path.clone())
    }

    pub fn download_cleanup(&self) -> Duration {
        Duration::from_secs(self.download_cleanup_secs)
    }

    pub fn generate_cleanup(&self) -> Duration {
        Duration::from_secs(self.generate_cleanup_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("documents.template_path"));
        }
        if self.answers_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("documents.answers_path"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("documents.output_path"));
        }
        let paths = self.paths();
        if paths.output == paths.template || paths.output == paths.backup {
            return Err(ValidationError::OutputOverwritesTemplate);
        }
        let bare = Path::new(&self.download_name)
            .file_name()
            .is_some_and(|name| name == self.download_name.as_str());
        if !bare || self.download_name.contains('"') {
            return Err(ValidationError::InvalidDownloadName);
        }
        Ok(())
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            answers_path: default_answers_path(),
            output_path: default_output_path(),
            download_name: default_download_name(),
            download_cleanup_secs: default_download_cleanup(),
            generate_cleanup_secs: default_generate_cleanup(),
        }
    }
}

fn default_template_path() -> PathBuf {
    PathBuf::from("WFNJ-1JEnglish.docx")
}

fn default_answers_path() -> PathBuf {
    PathBuf::from("answers.json")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("filled_template.docx")
}

fn default_download_name() -> String {
    "GetMyAid_Results.docx".to_string()
}

fn default_download_cleanup() -> u64 {
    5
}

fn default_generate_cleanup() -> u64 {
    300
}
