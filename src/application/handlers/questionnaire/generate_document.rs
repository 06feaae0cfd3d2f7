//! GenerateDocumentHandler - Explicit re-fill of the template.
//!
//! Uses the persisted answer set, so it works after the session that produced
//! the answers is gone. The output is scheduled for deletion after the
//! configured retention.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::questionnaire::replies;
use crate::ports::{DeletionScheduler, ScheduledDeletion};

use super::document_filler::{DocumentFillError, DocumentFiller, FilledDocument};

/// Command to regenerate the filled document.
#[derive(Debug, Clone, Default)]
pub struct GenerateDocumentCommand;

/// Result of document generation
#[derive(Debug, Clone)]
pub struct GenerateDocumentResult {
    pub message: String,
    pub document: FilledDocument,
    pub deletion: ScheduledDeletion,
}

/// Error type for document generation
#[derive(Debug, Clone)]
pub enum GenerateDocumentError {
    /// Answer set or template is missing
    NotFound(String),
    /// Anything else that stopped the fill
    Internal(String),
}

impl std::fmt::Display for GenerateDocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateDocumentError::NotFound(msg) => write!(f, "Not found: {}", msg),
            GenerateDocumentError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GenerateDocumentError {}

impl From<DocumentFillError> for GenerateDocumentError {
    fn from(err: DocumentFillError) -> Self {
        if err.is_not_found() {
            GenerateDocumentError::NotFound(err.to_string())
        } else {
            GenerateDocumentError::Internal(err.to_string())
        }
    }
}

/// Handler for the generation trigger.
///
/// # Dependencies
///
/// - `DocumentFiller`: Backup, fill and write
/// - `DeletionScheduler`: Removes the output after `retention`
pub struct GenerateDocumentHandler {
    filler: Arc<DocumentFiller>,
    scheduler: Arc<dyn DeletionScheduler>,
    retention: Duration,
}

impl GenerateDocumentHandler {
    pub fn new(
        filler: Arc<DocumentFiller>,
        scheduler: Arc<dyn DeletionScheduler>,
        retention: Duration,
    ) -> Self {
        Self {
            filler,
            scheduler,
            retention,
        }
    }

    pub async fn handle(
        &self,
        _cmd: GenerateDocumentCommand,
    ) -> Result<GenerateDocumentResult, GenerateDocumentError> {
        let document = self.filler.fill().await?;
        let deletion = self.scheduler.schedule(document.path.clone(), self.retention);

        info!(
            output = %document.path.display(),
            bytes = document.size_bytes,
            delete_at = %deletion.due_at,
            "Document generated"
        );

        Ok(GenerateDocumentResult {
            message: replies::DOCUMENT_GENERATED.to_string(),
            document,
            deletion,
        })
    }
}
