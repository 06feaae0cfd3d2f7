//! Shared error vocabulary: catalog validation failures and the codes
//! clients see in error bodies.

use std::fmt;
use thiserror::Error;

/// Why a question catalog entry was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' is duplicated: '{value}'")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Machine-readable `code` field of an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Template, answer record or generated output is missing
    NotFound,
    /// The judge model could not be reached or refused the call
    JudgeUnavailable,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::JudgeUnavailable => "JUDGE_UNAVAILABLE",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_names_the_field() {
        let err = ValidationError::empty_field("prompt");
        assert_eq!(format!("{}", err), "Field 'prompt' cannot be empty");
    }

    #[test]
    fn malformed_entry_names_position_and_reason() {
        let err = ValidationError::invalid_format("questions[2]", "expected an object");
        assert_eq!(
            format!("{}", err),
            "Field 'questions[2]' has invalid format: expected an object"
        );
    }

    #[test]
    fn duplicate_key_names_the_value() {
        let err = ValidationError::duplicate("key", "q1");
        assert_eq!(format!("{}", err), "Field 'key' is duplicated: 'q1'");
    }

    #[test]
    fn codes_render_in_screaming_snake_case() {
        assert_eq!(ErrorCode::JudgeUnavailable.to_string(), "JUDGE_UNAVAILABLE");
        assert_eq!(ErrorCode::NotFound.to_string(), "NOT_FOUND");
        assert_eq!(ErrorCode::StorageError.as_str(), "STORAGE_ERROR");
        assert_eq!(ErrorCode::InternalError.as_str(), "INTERNAL_ERROR");
    }
}
