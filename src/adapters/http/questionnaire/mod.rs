//! HTTP adapter for the questionnaire.
//!
//! # Endpoints
//!
//! - `POST /chatbot` - Submit an answer for the caller's conversation
//! - `POST /reset` - Reset the caller's conversation
//! - `POST /generate-doc` - Fill the template from stored answers
//! - `GET /download` - Download the filled document
//! - `GET /progress` - Conversation progress
//! - `GET /health` - Liveness and catalog size

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::{DownloadSettings, QuestionnaireAppState, SESSION_HEADER};
pub use routes::{app_router, questionnaire_router};
