//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers change session or document state; the progress query
//! only reads.

pub mod handlers;

pub use handlers::questionnaire::{
    DocumentFillError, DocumentFiller, DownloadDocumentCommand, DownloadDocumentError,
    DownloadDocumentHandler, DownloadDocumentResult, FilledDocument, GenerateDocumentCommand,
    GenerateDocumentError, GenerateDocumentHandler, GenerateDocumentResult, GetProgressError,
    GetProgressHandler, GetProgressQuery, ProgressView, ResetSessionCommand, ResetSessionError,
    ResetSessionHandler, ResetSessionResult, SubmitAnswerCommand, SubmitAnswerError,
    SubmitAnswerHandler, SubmitAnswerResult, SubmitOutcome,
};
