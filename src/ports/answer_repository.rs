//! Answer Set Repository Port - Durable single-slot answer record.
//!
//! The completed answer set is written once per finished questionnaire and
//! read back by the document filler. Each save overwrites the previous one.

use async_trait::async_trait;

use crate::domain::questionnaire::AnswerSet;

/// Errors that can occur while persisting or loading answers
#[derive(Debug, thiserror::Error)]
pub enum AnswerSetError {
    #[error("Answer set not found: {0}")]
    NotFound(String),

    #[error("Failed to serialize answers: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize answers: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the persisted answer set
#[async_trait]
pub trait AnswerSetRepository: Send + Sync {
    /// Persist the answer set, overwriting any previous one.
    async fn save(&self, answers: &AnswerSet) -> Result<(), AnswerSetError>;

    /// Load the persisted answer set.
    ///
    /// # Errors
    ///
    /// Returns `AnswerSetError::NotFound` if nothing has been persisted.
    async fn load(&self) -> Result<AnswerSet, AnswerSetError>;

    /// Check whether an answer set has been persisted.
    async fn exists(&self) -> Result<bool, AnswerSetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_location() {
        let err = AnswerSetError::NotFound("answers.json".to_string());
        assert_eq!(err.to_string(), "Answer set not found: answers.json");
    }

    #[test]
    fn deserialization_error_displays() {
        let err = AnswerSetError::DeserializationFailed("expected object".to_string());
        assert!(err.to_string().contains("deserialize"));
    }
}
