//! Session Store Port - Identity-keyed storage for questionnaire sessions.
//!
//! Replaces ambient framework sessions with explicit get/put/clear calls.
//! Each `SessionId` owns its state exclusively; no state is shared between
//! sessions.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::SessionState;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),
}

/// Port for persisting and loading session state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session, if one exists.
    async fn get(&self, session_id: SessionId) -> Result<Option<SessionState>, SessionStoreError>;

    /// Save the session, replacing any previous state for its id.
    async fn put(&self, state: &SessionState) -> Result<(), SessionStoreError>;

    /// Remove the session. Clearing a missing session is not an error.
    async fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError>;
}
