//! Artifact Storage Port - Filesystem operations on document artifacts.
//!
//! Artifacts are the template, its backup copy and the generated output.
//! The application layer only sees this trait; `LocalArtifactStorage`
//! provides the filesystem implementation.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Port for reading and writing document artifacts.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial content visible on failure)
/// - Create missing parent directories on write
/// - Report a missing file as `ArtifactError::NotFound`
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn ArtifactStorage = get_storage();
///
/// storage.copy(Path::new("form.docx"), Path::new("form_backup.docx")).await?;
/// let bytes = storage.read(Path::new("form.docx")).await?;
/// storage.write(Path::new("filled.docx"), &bytes).await?;
/// ```
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Check whether a file exists at `path`.
    async fn exists(&self, path: &Path) -> Result<bool, ArtifactError>;

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::NotFound` if the file doesn't exist.
    async fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactError>;

    /// Write `content` to `path`, replacing any existing file.
    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), ArtifactError>;

    /// Copy `from` to `to`, replacing any existing file at `to`.
    async fn copy(&self, from: &Path, to: &Path) -> Result<(), ArtifactError>;

    /// Delete the file at `path`.
    ///
    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, path: &Path) -> Result<bool, ArtifactError>;
}

/// Errors that can occur during artifact storage operations.
#[derive(Debug, Clone, Error)]
pub enum ArtifactError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ArtifactError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Maps an IO error for `path`, keeping not-found and permission kinds.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Self::permission_denied(path.display().to_string())
            }
            _ => Self::io(format!("{}: {}", path.display(), err)),
        }
    }
}
