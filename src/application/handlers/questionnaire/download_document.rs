//! DownloadDocumentHandler - Serves the filled document once.
//!
//! Reading the output schedules its deletion after a short delay.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::document::DocumentPaths;
use crate::ports::{ArtifactError, ArtifactStorage, DeletionScheduler};

/// Command to download the filled document.
#[derive(Debug, Clone, Default)]
pub struct DownloadDocumentCommand;

/// The document bytes plus what a client needs to save them.
#[derive(Debug, Clone)]
pub struct DownloadDocumentResult {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Error type for downloads
#[derive(Debug, Clone)]
pub enum DownloadDocumentError {
    /// No filled document exists
    NotFound(String),
    /// Reading the document failed
    Storage(String),
}

impl std::fmt::Display for DownloadDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadDocumentError::NotFound(path) => write!(f, "Document not found: {}", path),
            DownloadDocumentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for DownloadDocumentError {}

impl From<ArtifactError> for DownloadDocumentError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::NotFound { path } => DownloadDocumentError::NotFound(path),
            other => DownloadDocumentError::Storage(other.to_string()),
        }
    }
}

/// Handler for downloads.
///
/// # Dependencies
///
/// - `ArtifactStorage`: Reads the output file
/// - `DeletionScheduler`: Removes the output `cleanup_delay` after serving
pub struct DownloadDocumentHandler {
    storage: Arc<dyn ArtifactStorage>,
    scheduler: Arc<dyn DeletionScheduler>,
    paths: DocumentPaths,
    filename: String,
    cleanup_delay: Duration,
}

impl DownloadDocumentHandler {
    pub fn new(
        storage: Arc<dyn ArtifactStorage>,
        scheduler: Arc<dyn DeletionScheduler>,
        paths: DocumentPaths,
        filename: impl Into<String>,
        cleanup_delay: Duration,
    ) -> Self {
        Self {
            storage,
            scheduler,
            paths,
            filename: filename.into(),
            cleanup_delay,
        }
    }

    pub async fn handle(
        &self,
        _cmd: DownloadDocumentCommand,
    ) -> Result<DownloadDocumentResult, DownloadDocumentError> {
        let content = self.storage.read(&self.paths.output).await?;
        let deletion = self
            .scheduler
            .schedule(self.paths.output.clone(), self.cleanup_delay);

        info!(
            output = %self.paths.output.display(),
            bytes = content.len(),
            delete_at = %deletion.due_at,
            "Document downloaded"
        );

        Ok(DownloadDocumentResult {
            content,
            content_type: self.paths.format().content_type(),
            filename: self.filename.clone(),
        })
    }
}
