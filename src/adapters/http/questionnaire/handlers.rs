//! HTTP handlers for the questionnaire endpoints.
//!
//! These handlers connect Axum routes to the questionnaire command/query
//! handlers. Conversations are keyed by the `x-session-id` header; a request
//! without a usable id starts a new conversation and the id is echoed back.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::{Form, FromRequestParts, Json, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::application::{
    DownloadDocumentCommand, DownloadDocumentError, DownloadDocumentHandler, DocumentFiller,
    GenerateDocumentCommand, GenerateDocumentError, GenerateDocumentHandler, GetProgressError,
    GetProgressHandler, GetProgressQuery, ResetSessionCommand, ResetSessionError,
    ResetSessionHandler, SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler,
};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::questionnaire::QuestionCatalog;
use crate::ports::{AnswerJudge, AnswerSetRepository, ArtifactStorage, DeletionScheduler, SessionStore};

use super::dto::{
    ChatbotForm, ChatbotResponse, ErrorResponse, HealthResponse, MessageResponse,
    ProgressResponse,
};

/// Header carrying the conversation id in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Download name and cleanup delays for the filled document.
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub filename: String,
    pub download_cleanup: Duration,
    pub generate_cleanup: Duration,
}

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct QuestionnaireAppState {
    pub catalog: Arc<QuestionCatalog>,
    pub sessions: Arc<dyn SessionStore>,
    pub judge: Arc<dyn AnswerJudge>,
    pub answers: Arc<dyn AnswerSetRepository>,
    pub storage: Arc<dyn ArtifactStorage>,
    pub scheduler: Arc<dyn DeletionScheduler>,
    pub filler: Arc<DocumentFiller>,
    pub downloads: DownloadSettings,
}

impl QuestionnaireAppState {
    pub fn submit_answer_handler(&self) -> SubmitAnswerHandler {
        SubmitAnswerHandler::new(
            self.catalog.clone(),
            self.sessions.clone(),
            self.judge.clone(),
            self.answers.clone(),
            self.filler.clone(),
        )
    }

    pub fn reset_session_handler(&self) -> ResetSessionHandler {
        ResetSessionHandler::new(self.sessions.clone())
    }

    pub fn get_progress_handler(&self) -> GetProgressHandler {
        GetProgressHandler::new(self.catalog.clone(), self.sessions.clone())
    }

    pub fn generate_document_handler(&self) -> GenerateDocumentHandler {
        GenerateDocumentHandler::new(
            self.filler.clone(),
            self.scheduler.clone(),
            self.downloads.generate_cleanup,
        )
    }

    pub fn download_document_handler(&self) -> DownloadDocumentHandler {
        DownloadDocumentHandler::new(
            self.storage.clone(),
            self.scheduler.clone(),
            self.filler.paths().clone(),
            self.downloads.filename.clone(),
            self.downloads.download_cleanup,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Session Context
// ════════════════════════════════════════════════════════════════════════════════

/// Conversation id taken from `x-session-id`, or a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHeader(pub SessionId);

#[async_trait]
impl<S> FromRequestParts<S> for SessionHeader
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(SessionId::new);

        Ok(SessionHeader(session_id))
    }
}

fn echo_session(session_id: SessionId) -> [(&'static str, String); 1] {
    [(SESSION_HEADER, session_id.to_string())]
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chatbot - Submit one answer
pub async fn chatbot(
    State(state): State<QuestionnaireAppState>,
    SessionHeader(session_id): SessionHeader,
    Form(form): Form<ChatbotForm>,
) -> Result<Response, QuestionnaireApiError> {
    let handler = state.submit_answer_handler();
    let cmd = SubmitAnswerCommand {
        session_id,
        text: form.user_input,
    };

    let result = handler.handle(cmd).await?;

    let body = ChatbotResponse {
        response: result.reply,
        session_id: session_id.to_string(),
    };
    Ok((echo_session(session_id), Json(body)).into_response())
}

/// POST /reset - Forget the conversation's progress
pub async fn reset(
    State(state): State<QuestionnaireAppState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Response, QuestionnaireApiError> {
    let handler = state.reset_session_handler();
    let result = handler.handle(ResetSessionCommand { session_id }).await?;

    Ok((echo_session(session_id), Json(MessageResponse::new(result.message))).into_response())
}

/// POST /generate-doc - Fill the template from the stored answers
pub async fn generate_doc(
    State(state): State<QuestionnaireAppState>,
) -> Result<Json<MessageResponse>, QuestionnaireApiError> {
    let handler = state.generate_document_handler();
    let result = handler.handle(GenerateDocumentCommand).await?;

    Ok(Json(MessageResponse::new(result.message)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /download - Filled document as an attachment
pub async fn download(
    State(state): State<QuestionnaireAppState>,
) -> Result<Response, QuestionnaireApiError> {
    let handler = state.download_document_handler();
    let result = handler.handle(DownloadDocumentCommand).await?;

    let headers = [
        (header::CONTENT_TYPE, result.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        ),
    ];
    Ok((headers, result.content).into_response())
}

/// GET /progress - Where the conversation stands
pub async fn progress(
    State(state): State<QuestionnaireAppState>,
    SessionHeader(session_id): SessionHeader,
) -> Result<Response, QuestionnaireApiError> {
    let handler = state.get_progress_handler();
    let view = handler.handle(GetProgressQuery { session_id }).await?;

    Ok((echo_session(session_id), Json(ProgressResponse::from(view))).into_response())
}

/// GET /health - Liveness plus catalog size
pub async fn health(State(state): State<QuestionnaireAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        questions: state.catalog.len(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts handler errors to HTTP responses.
#[derive(Debug)]
pub enum QuestionnaireApiError {
    NotFound(String),
    JudgeUnavailable(String),
    Storage(String),
    Internal(String),
}

impl From<SubmitAnswerError> for QuestionnaireApiError {
    fn from(err: SubmitAnswerError) -> Self {
        match err {
            SubmitAnswerError::Judge(msg) => QuestionnaireApiError::JudgeUnavailable(msg),
            SubmitAnswerError::Session(msg) | SubmitAnswerError::Storage(msg) => {
                QuestionnaireApiError::Storage(msg)
            }
            SubmitAnswerError::Fill(e) => {
                let msg = format!("Answers were saved but the document could not be filled: {}", e);
                if e.is_not_found() {
                    QuestionnaireApiError::NotFound(msg)
                } else {
                    QuestionnaireApiError::Internal(msg)
                }
            }
        }
    }
}

impl From<ResetSessionError> for QuestionnaireApiError {
    fn from(err: ResetSessionError) -> Self {
        match err {
            ResetSessionError::Session(msg) => QuestionnaireApiError::Storage(msg),
        }
    }
}

impl From<GetProgressError> for QuestionnaireApiError {
    fn from(err: GetProgressError) -> Self {
        match err {
            GetProgressError::Session(msg) => QuestionnaireApiError::Storage(msg),
        }
    }
}

impl From<GenerateDocumentError> for QuestionnaireApiError {
    fn from(err: GenerateDocumentError) -> Self {
        match err {
            GenerateDocumentError::NotFound(msg) => QuestionnaireApiError::NotFound(msg),
            GenerateDocumentError::Internal(msg) => QuestionnaireApiError::Internal(msg),
        }
    }
}

impl From<DownloadDocumentError> for QuestionnaireApiError {
    fn from(err: DownloadDocumentError) -> Self {
        match err {
            DownloadDocumentError::NotFound(_) => {
                QuestionnaireApiError::NotFound("No filled document available".to_string())
            }
            DownloadDocumentError::Storage(msg) => QuestionnaireApiError::Storage(msg),
        }
    }
}

impl IntoResponse for QuestionnaireApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            QuestionnaireApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound, msg),
            ),
            QuestionnaireApiError::JudgeUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse::new(ErrorCode::JudgeUnavailable, msg)
                    .with_details(serde_json::json!({ "retryable": true })),
            ),
            QuestionnaireApiError::Storage(msg) => {
                warn!(error = %msg, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::StorageError, msg),
                )
            }
            QuestionnaireApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(ErrorCode::InternalError, msg),
            ),
        };
        (status, Json(error)).into_response()
    }
}
