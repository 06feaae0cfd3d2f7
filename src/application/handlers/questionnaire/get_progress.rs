//! GetProgressHandler - Read-only view of where a session stands.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::{QuestionCatalog, QuestionnaireStatus, SessionState};
use crate::ports::{SessionStore, SessionStoreError};

/// Query for a session's progress.
#[derive(Debug, Clone)]
pub struct GetProgressQuery {
    pub session_id: SessionId,
}

/// Snapshot of a session relative to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub session_id: SessionId,
    pub question_index: usize,
    pub total_questions: usize,
    pub current_prompt: Option<String>,
    pub answered: usize,
    pub status: QuestionnaireStatus,
}

impl ProgressView {
    pub fn is_complete(&self) -> bool {
        self.status == QuestionnaireStatus::Complete
    }
}

/// Error type for progress queries
#[derive(Debug, Clone)]
pub enum GetProgressError {
    Session(String),
}

impl std::fmt::Display for GetProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetProgressError::Session(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for GetProgressError {}

impl From<SessionStoreError> for GetProgressError {
    fn from(err: SessionStoreError) -> Self {
        GetProgressError::Session(err.to_string())
    }
}

/// Reports progress without creating or touching the session.
pub struct GetProgressHandler {
    catalog: Arc<QuestionCatalog>,
    sessions: Arc<dyn SessionStore>,
}

impl GetProgressHandler {
    pub fn new(catalog: Arc<QuestionCatalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub async fn handle(&self, query: GetProgressQuery) -> Result<ProgressView, GetProgressError> {
        let state = self
            .sessions
            .get(query.session_id)
            .await?
            .unwrap_or_else(|| SessionState::new(query.session_id));

        Ok(ProgressView {
            session_id: query.session_id,
            question_index: state.question_index,
            total_questions: self.catalog.len(),
            current_prompt: state
                .current_question(&self.catalog)
                .map(|q| q.prompt.clone()),
            answered: state.answers.len(),
            status: state.status(&self.catalog),
        })
    }
}
