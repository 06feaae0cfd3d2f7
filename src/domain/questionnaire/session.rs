//! Session State Entity
//!
//! Tracks one conversation's position in the questionnaire, the short-lived
//! judge exchange buffer and the answers accepted so far.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

use super::answers::AnswerSet;
use super::catalog::{QuestionCatalog, QuestionRecord};

/// Who authored a turn in the judge exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

/// One message in the judge exchange buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ExchangeTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }
}

/// Where a session stands relative to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum QuestionnaireStatus {
    /// Waiting for an answer to the question at this index.
    AwaitingAnswer(usize),
    /// Every question has been answered.
    Complete,
}

/// Mutable per-conversation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: SessionId,
    pub question_index: usize,
    pub pending_exchange: Vec<ExchangeTurn>,
    pub answers: AnswerSet,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Fresh session positioned at the first question.
    pub fn new(session_id: SessionId) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            question_index: 0,
            pending_exchange: Vec::new(),
            answers: AnswerSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self, catalog: &QuestionCatalog) -> QuestionnaireStatus {
        if self.question_index >= catalog.len() {
            QuestionnaireStatus::Complete
        } else {
            QuestionnaireStatus::AwaitingAnswer(self.question_index)
        }
    }

    /// The question currently awaiting an answer.
    pub fn current_question<'a>(&self, catalog: &'a QuestionCatalog) -> Option<&'a QuestionRecord> {
        catalog.get(self.question_index)
    }

    /// Appends a turn to the judge exchange buffer.
    pub fn push_exchange(&mut self, turn: ExchangeTurn) {
        self.pending_exchange.push(turn);
        self.updated_at = Utc::now();
    }

    /// Drains the judge exchange buffer, leaving it empty.
    pub fn take_exchange(&mut self) -> Vec<ExchangeTurn> {
        self.updated_at = Utc::now();
        std::mem::take(&mut self.pending_exchange)
    }

    /// Records an accepted answer and moves to the next question.
    ///
    /// Returns the new question index.
    pub fn accept_answer(&mut self, answer_type: &str, answer: impl Into<String>) -> usize {
        self.answers.insert(answer_type, answer);
        self.question_index += 1;
        self.updated_at = Utc::now();
        self.question_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_question_catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            QuestionRecord::new("q0", "Name?", "name"),
            QuestionRecord::new("q1", "Age?", "age"),
        ])
        .unwrap()
    }

    #[test]
    fn new_session_awaits_first_question() {
        let catalog = two_question_catalog();
        let state = SessionState::new(SessionId::new());

        assert_eq!(state.question_index, 0);
        assert!(state.answers.is_empty());
        assert!(state.pending_exchange.is_empty());
        assert_eq!(state.status(&catalog), QuestionnaireStatus::AwaitingAnswer(0));
        assert_eq!(state.current_question(&catalog).unwrap().prompt, "Name?");
    }

    #[test]
    fn accept_answer_records_under_answer_type_and_advances() {
        let catalog = two_question_catalog();
        let mut state = SessionState::new(SessionId::new());

        let next = state.accept_answer("name", "Alice");

        assert_eq!(next, 1);
        assert_eq!(state.answers.get("name"), Some("Alice"));
        assert!(!state.answers.contains_key("q0"));
        assert_eq!(state.status(&catalog), QuestionnaireStatus::AwaitingAnswer(1));
    }

    #[test]
    fn status_is_complete_once_index_reaches_catalog_length() {
        let catalog = two_question_catalog();
        let mut state = SessionState::new(SessionId::new());

        state.accept_answer("name", "Alice");
        state.accept_answer("age", "thirty");

        assert_eq!(state.status(&catalog), QuestionnaireStatus::Complete);
        assert!(state.current_question(&catalog).is_none());
    }

    #[test]
    fn empty_catalog_is_complete_immediately() {
        let catalog = QuestionCatalog::default();
        let state = SessionState::new(SessionId::new());
        assert_eq!(state.status(&catalog), QuestionnaireStatus::Complete);
    }

    #[test]
    fn take_exchange_empties_buffer() {
        let mut state = SessionState::new(SessionId::new());
        state.push_exchange(ExchangeTurn::user("first"));

        let taken = state.take_exchange();

        assert_eq!(taken, vec![ExchangeTurn::user("first")]);
        assert!(state.pending_exchange.is_empty());
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_value(QuestionnaireStatus::AwaitingAnswer(3)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "awaiting_answer", "index": 3 }));

        let json = serde_json::to_value(QuestionnaireStatus::Complete).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "complete" }));
    }
}
