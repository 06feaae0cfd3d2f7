//! DocumentFiller - Fills the template from the persisted answer set.
//!
//! Shared by questionnaire completion and the explicit generation command.
//! Order of operations:
//! 1. answer set and template must exist
//! 2. template is copied to its backup path
//! 3. template is rendered with the answers
//! 4. result overwrites the single output slot

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::document::DocumentPaths;
use crate::ports::{
    AnswerSetError, AnswerSetRepository, ArtifactError, ArtifactStorage, RenderError,
    TemplateRenderer,
};

/// A freshly written output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledDocument {
    pub path: PathBuf,
    pub size_bytes: usize,
    pub answers_used: usize,
}

/// Error type for document filling
#[derive(Debug, Clone)]
pub enum DocumentFillError {
    /// No answer set has been persisted yet
    AnswersNotFound(String),
    /// Template file is missing
    TemplateNotFound(String),
    /// Reading or writing an artifact failed
    Storage(String),
    /// Template could not be rendered
    Render(String),
}

impl std::fmt::Display for DocumentFillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFillError::AnswersNotFound(path) => write!(f, "Answers not found: {}", path),
            DocumentFillError::TemplateNotFound(path) => {
                write!(f, "Template not found: {}", path)
            }
            DocumentFillError::Storage(msg) => write!(f, "Storage error: {}", msg),
            DocumentFillError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentFillError {}

impl DocumentFillError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocumentFillError::AnswersNotFound(_) | DocumentFillError::TemplateNotFound(_)
        )
    }
}

impl From<AnswerSetError> for DocumentFillError {
    fn from(err: AnswerSetError) -> Self {
        match err {
            AnswerSetError::NotFound(path) => DocumentFillError::AnswersNotFound(path),
            other => DocumentFillError::Storage(other.to_string()),
        }
    }
}

impl From<ArtifactError> for DocumentFillError {
    fn from(err: ArtifactError) -> Self {
        DocumentFillError::Storage(err.to_string())
    }
}

impl From<RenderError> for DocumentFillError {
    fn from(err: RenderError) -> Self {
        DocumentFillError::Render(err.to_string())
    }
}

/// Fills the configured template.
///
/// # Dependencies
///
/// - `AnswerSetRepository`: Source of answers
/// - `ArtifactStorage`: Template, backup and output files
/// - `TemplateRenderer`: Placeholder substitution for the template's format
pub struct DocumentFiller {
    answers: Arc<dyn AnswerSetRepository>,
    storage: Arc<dyn ArtifactStorage>,
    renderer: Arc<dyn TemplateRenderer>,
    paths: DocumentPaths,
}

impl DocumentFiller {
    pub fn new(
        answers: Arc<dyn AnswerSetRepository>,
        storage: Arc<dyn ArtifactStorage>,
        renderer: Arc<dyn TemplateRenderer>,
        paths: DocumentPaths,
    ) -> Self {
        Self {
            answers,
            storage,
            renderer,
            paths,
        }
    }

    pub fn paths(&self) -> &DocumentPaths {
        &self.paths
    }

    pub async fn fill(&self) -> Result<FilledDocument, DocumentFillError> {
        let result = self.fill_inner().await;
        if let Err(ref e) = result {
            if !e.is_not_found() {
                error!(error = %e, template = %self.paths.template.display(), "Document fill failed");
            }
        }
        result
    }

    async fn fill_inner(&self) -> Result<FilledDocument, DocumentFillError> {
        if !self.answers.exists().await? {
            return Err(DocumentFillError::AnswersNotFound("no answers persisted".to_string()));
        }
        if !self.storage.exists(&self.paths.template).await? {
            return Err(DocumentFillError::TemplateNotFound(
                self.paths.template.display().to_string(),
            ));
        }

        self.storage
            .copy(&self.paths.template, &self.paths.backup)
            .await?;

        let answers = self.answers.load().await?;
        let template = self.storage.read(&self.paths.template).await?;
        let filled = self.renderer.render(&template, &answers)?;
        self.storage.write(&self.paths.output, &filled).await?;

        info!(
            output = %self.paths.output.display(),
            format = %self.renderer.format(),
            answers = answers.len(),
            "Filled document written"
        );

        Ok(FilledDocument {
            path: self.paths.output.clone(),
            size_bytes: filled.len(),
            answers_used: answers.len(),
        })
    }
}
