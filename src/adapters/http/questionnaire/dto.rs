//! Request and response bodies for the questionnaire endpoints.

use serde::{Deserialize, Serialize};

use crate::application::ProgressView;
use crate::domain::foundation::ErrorCode;

/// Form body of `POST /chatbot`. A missing field reads as empty input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatbotForm {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub response: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub session_id: String,
    pub question_index: usize,
    pub total_questions: usize,
    pub answered: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<String>,
    pub complete: bool,
}

impl From<ProgressView> for ProgressResponse {
    fn from(view: ProgressView) -> Self {
        Self {
            complete: view.is_complete(),
            session_id: view.session_id.to_string(),
            question_index: view.question_index,
            total_questions: view.total_questions,
            answered: view.answered,
            current_question: view.current_prompt,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub questions: usize,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
