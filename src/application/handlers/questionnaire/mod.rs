//! Questionnaire command and query handlers.
//!
//! Handlers for the chat flow, document generation and download.

mod document_filler;

// Command handlers
mod download_document;
mod generate_document;
mod reset_session;
mod submit_answer;

// Query handlers
mod get_progress;

pub use document_filler::{DocumentFillError, DocumentFiller, FilledDocument};
pub use download_document::{
    DownloadDocumentCommand, DownloadDocumentError, DownloadDocumentHandler,
    DownloadDocumentResult,
};
pub use generate_document::{
    GenerateDocumentCommand, GenerateDocumentError, GenerateDocumentHandler,
    GenerateDocumentResult,
};
pub use get_progress::{GetProgressError, GetProgressHandler, GetProgressQuery, ProgressView};
pub use reset_session::{
    ResetSessionCommand, ResetSessionError, ResetSessionHandler, ResetSessionResult,
};
pub use submit_answer::{
    SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler, SubmitAnswerResult,
    SubmitOutcome,
};
