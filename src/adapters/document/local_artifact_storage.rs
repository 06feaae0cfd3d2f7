//! Local Filesystem Artifact Storage - Implementation of ArtifactStorage.
//!
//! Reads templates and writes backups and filled documents on the local
//! filesystem. Writes are atomic.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ArtifactError, ArtifactStorage};

/// Local filesystem storage for document artifacts.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Write content to `{name}.tmp` next to the target
/// 2. Sync to disk
/// 3. Rename to `{name}`
///
/// A crash mid-write never leaves a truncated document at the target path.
#[derive(Debug, Clone, Default)]
pub struct LocalArtifactStorage;

impl LocalArtifactStorage {
    pub fn new() -> Self {
        Self
    }

    /// Returns the temporary file path for atomic writes.
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Ensures the parent directory exists.
    async fn ensure_parent_dir(path: &Path) -> Result<(), ArtifactError> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).await.map_err(|e| {
                    ArtifactError::io(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn exists(&self, path: &Path) -> Result<bool, ArtifactError> {
        fs::try_exists(path)
            .await
            .map_err(|e| ArtifactError::from_io(path, e))
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>, ArtifactError> {
        fs::read(path)
            .await
            .map_err(|e| ArtifactError::from_io(path, e))
    }

    async fn write(&self, path: &Path, content: &[u8]) -> Result<(), ArtifactError> {
        Self::ensure_parent_dir(path).await?;

        let temp_path = Self::temp_path(path);

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, path).await.map_err(|e| {
            ArtifactError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            ))
        })
    }

    async fn copy(&self, from: &Path, to: &Path) -> Result<(), ArtifactError> {
        let content = self.read(from).await?;
        self.write(to, &content).await
    }

    async fn delete(&self, path: &Path) -> Result<bool, ArtifactError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ArtifactError::from_io(path, e)),
        }
    }
}
