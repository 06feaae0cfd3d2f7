//! ResetSessionHandler - Drops a session's progress.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::replies;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to reset one conversation.
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct ResetSessionResult {
    pub message: String,
}

/// Error type for resetting a session
#[derive(Debug, Clone)]
pub enum ResetSessionError {
    Session(String),
}

impl std::fmt::Display for ResetSessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetSessionError::Session(msg) => write!(f, "Session error: {}", msg),
        }
    }
}

impl std::error::Error for ResetSessionError {}

impl From<SessionStoreError> for ResetSessionError {
    fn from(err: SessionStoreError) -> Self {
        ResetSessionError::Session(err.to_string())
    }
}

/// Clears the session. Persisted answers and filled documents are untouched.
pub struct ResetSessionHandler {
    sessions: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: ResetSessionCommand,
    ) -> Result<ResetSessionResult, ResetSessionError> {
        self.sessions.clear(cmd.session_id).await?;
        info!(session_id = %cmd.session_id, "Session reset");

        Ok(ResetSessionResult {
            message: replies::CONVERSATION_RESET.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::questionnaire::SessionState;

    #[tokio::test]
    async fn reset_clears_progress() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let mut state = SessionState::new(SessionId::new());
        state.accept_answer("name", "Alice");
        sessions.put(&state).await.unwrap();
        let handler = ResetSessionHandler::new(sessions.clone());

        let result = handler
            .handle(ResetSessionCommand {
                session_id: state.session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.message, "Conversation reset.");
        assert!(sessions.get(state.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reset_of_unknown_session_succeeds() {
        let handler = ResetSessionHandler::new(Arc::new(InMemorySessionStore::new()));

        let result = handler
            .handle(ResetSessionCommand {
                session_id: SessionId::new(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn reset_leaves_other_sessions_alone() {
        let sessions = Arc::new(InMemorySessionStore::new());
        let other = SessionState::new(SessionId::new());
        sessions.put(&other).await.unwrap();
        let handler = ResetSessionHandler::new(sessions.clone());

        handler
            .handle(ResetSessionCommand {
                session_id: SessionId::new(),
            })
            .await
            .unwrap();

        assert!(sessions.get(other.session_id).await.unwrap().is_some());
    }
}
