//! File-based Answer Set Repository
//!
//! Stores the completed answer set as a pretty-printed JSON object at a
//! single configured path. Every save overwrites the file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::questionnaire::AnswerSet;
use crate::ports::{AnswerSetError, AnswerSetRepository};

/// JSON file storage for the answer set
#[derive(Debug, Clone)]
pub struct FileAnswerSetRepository {
    path: PathBuf,
}

impl FileAnswerSetRepository {
    /// Create a repository writing to `path`
    ///
    /// # Example
    /// ```ignore
    /// let repo = FileAnswerSetRepository::new("answers.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), AnswerSetError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .await
                .map_err(|e| AnswerSetError::IoError(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AnswerSetRepository for FileAnswerSetRepository {
    async fn save(&self, answers: &AnswerSet) -> Result<(), AnswerSetError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(answers)
            .map_err(|e| AnswerSetError::SerializationFailed(e.to_string()))?;

        // Write-then-rename so readers never see a half-written file
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)
            .await
            .map_err(|e| AnswerSetError::IoError(e.to_string()))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| AnswerSetError::IoError(e.to_string()))?;

        Ok(())
    }

    async fn load(&self) -> Result<AnswerSet, AnswerSetError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AnswerSetError::NotFound(self.path.display().to_string()))
            }
            Err(e) => return Err(AnswerSetError::IoError(e.to_string())),
        };

        serde_json::from_str(&json).map_err(|e| AnswerSetError::DeserializationFailed(e.to_string()))
    }

    async fn exists(&self) -> Result<bool, AnswerSetError> {
        fs::try_exists(&self.path)
            .await
            .map_err(|e| AnswerSetError::IoError(e.to_string()))
    }
}
