//! In-Memory Session Store Adapter
//!
//! Keeps questionnaire sessions in a process-local map keyed by `SessionId`.
//! Sessions are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::SessionState;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for session state
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&session_id).cloned())
    }

    async fn put(&self, state: &SessionState) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(state.session_id, state.clone());
        Ok(())
    }

    async fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_session_returns_none() {
        let store = InMemorySessionStore::new();
        assert!(store.get(SessionId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let mut state = SessionState::new(SessionId::new());
        state.accept_answer("name", "Alice");

        store.put(&state).await.unwrap();
        let loaded = store.get(state.session_id).await.unwrap().unwrap();

        assert_eq!(loaded, state);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn put_replaces_previous_state() {
        let store = InMemorySessionStore::new();
        let mut state = SessionState::new(SessionId::new());
        store.put(&state).await.unwrap();

        state.accept_answer("name", "Bob");
        store.put(&state).await.unwrap();

        let loaded = store.get(state.session_id).await.unwrap().unwrap();
        assert_eq!(loaded.question_index, 1);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let mut a = SessionState::new(SessionId::new());
        let b = SessionState::new(SessionId::new());
        a.accept_answer("name", "Alice");

        store.put(&a).await.unwrap();
        store.put(&b).await.unwrap();

        let loaded_b = store.get(b.session_id).await.unwrap().unwrap();
        assert_eq!(loaded_b.question_index, 0);
        assert!(loaded_b.answers.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_only_that_session() {
        let store = InMemorySessionStore::new();
        let a = SessionState::new(SessionId::new());
        let b = SessionState::new(SessionId::new());
        store.put(&a).await.unwrap();
        store.put(&b).await.unwrap();

        store.clear(a.session_id).await.unwrap();
        store.clear(SessionId::new()).await.unwrap();

        assert!(store.get(a.session_id).await.unwrap().is_none());
        assert!(store.get(b.session_id).await.unwrap().is_some());
    }
}
