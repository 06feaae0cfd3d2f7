//! SubmitAnswerHandler - Advances a session by one user message.
//!
//! Loads (or lazily starts) the session, asks the judge whether the text
//! answers the current question, and then either advances, re-prompts, or
//! completes the questionnaire. Completion persists the answer set, fills
//! the document and clears the session.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::{
    judge_request, replies, ExchangeTurn, QuestionCatalog, SessionState,
};
use crate::ports::{
    AnswerJudge, AnswerSetError, AnswerSetRepository, JudgeError, SessionStore, SessionStoreError,
};

use super::document_filler::{DocumentFillError, DocumentFiller};

/// Command to submit one chat message.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// What the message did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing touched.
    EmptyInput,
    /// Session had no question left to answer.
    AlreadyComplete,
    /// Answer accepted; the session now awaits `next_index`.
    Accepted { next_index: usize },
    /// Last answer accepted; answers persisted and document filled.
    Completed,
    /// Answer judged invalid; the question at `index` is asked again.
    Rejected { index: usize },
}

/// Result of a submitted message.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    pub session_id: SessionId,
    pub reply: String,
    pub outcome: SubmitOutcome,
}

/// Error type for submitting an answer
#[derive(Debug, Clone)]
pub enum SubmitAnswerError {
    /// Judge could not produce a verdict; session left untouched
    Judge(String),
    /// Session store failure
    Session(String),
    /// Answer set could not be persisted
    Storage(String),
    /// Answers were persisted and the session cleared, but filling failed
    Fill(DocumentFillError),
}

impl std::fmt::Display for SubmitAnswerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitAnswerError::Judge(msg) => write!(f, "Judge unavailable: {}", msg),
            SubmitAnswerError::Session(msg) => write!(f, "Session error: {}", msg),
            SubmitAnswerError::Storage(msg) => write!(f, "Storage error: {}", msg),
            SubmitAnswerError::Fill(err) => write!(f, "Document fill failed: {}", err),
        }
    }
}

impl std::error::Error for SubmitAnswerError {}

impl From<JudgeError> for SubmitAnswerError {
    fn from(err: JudgeError) -> Self {
        SubmitAnswerError::Judge(err.to_string())
    }
}

impl From<SessionStoreError> for SubmitAnswerError {
    fn from(err: SessionStoreError) -> Self {
        SubmitAnswerError::Session(err.to_string())
    }
}

impl From<AnswerSetError> for SubmitAnswerError {
    fn from(err: AnswerSetError) -> Self {
        SubmitAnswerError::Storage(err.to_string())
    }
}

impl From<DocumentFillError> for SubmitAnswerError {
    fn from(err: DocumentFillError) -> Self {
        SubmitAnswerError::Fill(err)
    }
}

/// Handler for chat messages.
///
/// # Dependencies
///
/// - `QuestionCatalog`: Question order, prompts and persistence keys
/// - `SessionStore`: Per-session progress
/// - `AnswerJudge`: Yes/No validity check
/// - `AnswerSetRepository`: Durable answers on completion
/// - `DocumentFiller`: Template fill on completion
pub struct SubmitAnswerHandler {
    catalog: Arc<QuestionCatalog>,
    sessions: Arc<dyn SessionStore>,
    judge: Arc<dyn AnswerJudge>,
    answers: Arc<dyn AnswerSetRepository>,
    filler: Arc<DocumentFiller>,
}

impl SubmitAnswerHandler {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        sessions: Arc<dyn SessionStore>,
        judge: Arc<dyn AnswerJudge>,
        answers: Arc<dyn AnswerSetRepository>,
        filler: Arc<DocumentFiller>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            judge,
            answers,
            filler,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, SubmitAnswerError> {
        let session_id = cmd.session_id;
        let respond = |reply: String, outcome: SubmitOutcome| SubmitAnswerResult {
            session_id,
            reply,
            outcome,
        };

        let text = cmd.text.trim();
        if text.is_empty() {
            return Ok(respond(replies::EMPTY_INPUT.to_string(), SubmitOutcome::EmptyInput));
        }

        let mut state = self
            .sessions
            .get(session_id)
            .await?
            .unwrap_or_else(|| SessionState::new(session_id));

        let Some(question) = state.current_question(&self.catalog) else {
            return Ok(respond(
                replies::ALREADY_COMPLETE.to_string(),
                SubmitOutcome::AlreadyComplete,
            ));
        };
        let index = state.question_index;

        state.push_exchange(ExchangeTurn::user(judge_request(&question.prompt, text)));
        let exchange = state.take_exchange();

        // A failed judge call returns before anything is stored.
        let verdict = self.judge.judge(session_id, &exchange).await?;
        debug!(%session_id, index, ?verdict, "Answer judged");

        if !verdict.is_valid() {
            self.sessions.put(&state).await?;
            return Ok(respond(
                replies::retry_question(&question.prompt),
                SubmitOutcome::Rejected { index },
            ));
        }

        let next_index = state.accept_answer(&question.answer_type, text);
        if let Some(next) = state.current_question(&self.catalog) {
            self.sessions.put(&state).await?;
            return Ok(respond(
                replies::next_question(&next.prompt),
                SubmitOutcome::Accepted { next_index },
            ));
        }

        self.complete(state).await?;
        Ok(respond(replies::ALL_ANSWERED.to_string(), SubmitOutcome::Completed))
    }

    async fn complete(&self, state: SessionState) -> Result<(), SubmitAnswerError> {
        let session_id = state.session_id;
        self.answers.save(&state.answers).await?;
        info!(%session_id, answers = state.answers.len(), "Questionnaire completed");

        let filled = self.filler.fill().await;
        self.sessions.clear(session_id).await?;

        match filled {
            Ok(document) => {
                info!(%session_id, output = %document.path.display(), "Completion document filled");
                Ok(())
            }
            Err(err) => {
                warn!(%session_id, error = %err, "Completion fill failed; answers kept");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{LlmAnswerJudge, MockAIProvider, MockError};
    use crate::adapters::document::{LocalArtifactStorage, PlainTextRenderer};
    use crate::adapters::storage::{FileAnswerSetRepository, InMemorySessionStore};
    use crate::domain::document::DocumentPaths;
    use crate::domain::questionnaire::QuestionRecord;
    use crate::ports::AIProvider;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        ai: MockAIProvider,
        sessions: Arc<InMemorySessionStore>,
        answers: Arc<FileAnswerSetRepository>,
        handler: SubmitAnswerHandler,
    }

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            QuestionRecord::new("q0", "Name?", "name"),
            QuestionRecord::new("q1", "Age?", "age"),
        ])
        .unwrap()
    }

    fn fixture_with(catalog: QuestionCatalog, ai: MockAIProvider) -> Fixture {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("form.txt"), "{{name}} is {{age}}").unwrap();

        let sessions = Arc::new(InMemorySessionStore::new());
        let answers = Arc::new(FileAnswerSetRepository::new(dir.path().join("answers.json")));
        let filler = Arc::new(DocumentFiller::new(
            answers.clone(),
            Arc::new(LocalArtifactStorage::new()),
            Arc::new(PlainTextRenderer::new()),
            DocumentPaths::new(dir.path().join("form.txt"), dir.path().join("filled.txt")),
        ));
        let provider: Arc<dyn AIProvider> = Arc::new(ai.clone());
        let handler = SubmitAnswerHandler::new(
            Arc::new(catalog),
            sessions.clone(),
            Arc::new(LlmAnswerJudge::new(provider)),
            answers.clone(),
            filler,
        );

        Fixture {
            dir,
            ai,
            sessions,
            answers,
            handler,
        }
    }

    fn fixture(ai: MockAIProvider) -> Fixture {
        fixture_with(catalog(), ai)
    }

    fn submit(session_id: SessionId, text: &str) -> SubmitAnswerCommand {
        SubmitAnswerCommand {
            session_id,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn full_questionnaire_persists_fills_and_clears() {
        let fx = fixture(MockAIProvider::new().with_response("Yes").with_response("Yes"));
        let id = SessionId::new();

        let first = fx.handler.handle(submit(id, "Alice")).await.unwrap();
        assert_eq!(first.reply, "✅ Got it. Now, Age?");
        assert_eq!(first.outcome, SubmitOutcome::Accepted { next_index: 1 });

        let second = fx.handler.handle(submit(id, "thirty")).await.unwrap();
        assert_eq!(second.reply, "✅ All questions have been answered. Thank you!");
        assert_eq!(second.outcome, SubmitOutcome::Completed);

        let saved = fx.answers.load().await.unwrap();
        assert_eq!(saved.get("name"), Some("Alice"));
        assert_eq!(saved.get("age"), Some("thirty"));
        assert_eq!(
            std::fs::read_to_string(fx.dir.path().join("filled.txt")).unwrap(),
            "Alice is thirty"
        );
        assert!(fx.sessions.get(id).await.unwrap().is_none());
        assert_eq!(fx.ai.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_input_never_reaches_judge_or_store() {
        let fx = fixture(MockAIProvider::new());
        let id = SessionId::new();

        let result = fx.handler.handle(submit(id, "   \n\t")).await.unwrap();

        assert_eq!(result.reply, "Please enter a message.");
        assert_eq!(result.outcome, SubmitOutcome::EmptyInput);
        assert_eq!(fx.ai.call_count(), 0);
        assert!(fx.sessions.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_answer_reprompts_same_question() {
        let fx = fixture(MockAIProvider::new().with_response("No"));
        let id = SessionId::new();

        let result = fx.handler.handle(submit(id, "blue")).await.unwrap();

        assert_eq!(
            result.reply,
            "❌ Sorry, your answer wasn’t clear. Please try again: Name?"
        );
        assert_eq!(result.outcome, SubmitOutcome::Rejected { index: 0 });
        let state = fx.sessions.get(id).await.unwrap().unwrap();
        assert_eq!(state.question_index, 0);
        assert!(state.answers.is_empty());
        assert!(state.pending_exchange.is_empty());
    }

    #[tokio::test]
    async fn verdict_is_normalised_before_comparison() {
        let fx = fixture(MockAIProvider::new().with_response("  YES \n"));
        let id = SessionId::new();

        let result = fx.handler.handle(submit(id, "Alice")).await.unwrap();

        assert_eq!(result.outcome, SubmitOutcome::Accepted { next_index: 1 });
    }

    #[tokio::test]
    async fn judge_failure_leaves_state_unchanged() {
        let fx = fixture(
            MockAIProvider::new()
                .with_response("Yes")
                .with_error(MockError::Unavailable {
                    message: "overloaded".to_string(),
                }),
        );
        let id = SessionId::new();
        fx.handler.handle(submit(id, "Alice")).await.unwrap();

        let err = fx.handler.handle(submit(id, "thirty")).await.unwrap_err();

        assert!(matches!(err, SubmitAnswerError::Judge(_)));
        let state = fx.sessions.get(id).await.unwrap().unwrap();
        assert_eq!(state.question_index, 1);
        assert!(!state.answers.contains_key("age"));
        assert!(!fx.answers.exists().await.unwrap());
    }

    #[tokio::test]
    async fn judge_failure_on_first_message_creates_no_session() {
        let fx = fixture(MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 }));
        let id = SessionId::new();

        let err = fx.handler.handle(submit(id, "Alice")).await.unwrap_err();

        assert!(matches!(err, SubmitAnswerError::Judge(_)));
        assert!(fx.sessions.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn judge_sees_exactly_one_exchange() {
        let fx = fixture(MockAIProvider::new().with_response("No").with_response("Yes"));
        let id = SessionId::new();

        fx.handler.handle(submit(id, "blue")).await.unwrap();
        fx.handler.handle(submit(id, "  Alice  ")).await.unwrap();

        let calls = fx.ai.get_calls();
        assert_eq!(calls.len(), 2);
        let last = &calls[1];
        assert_eq!(last.turns.len(), 1);
        assert_eq!(
            last.turns[0].content,
            "User was asked: 'Name?'\nUser answered: 'Alice'\nIs this a valid and complete answer? Reply only Yes or No."
        );
    }

    #[tokio::test]
    async fn trimmed_text_is_recorded() {
        let fx = fixture(MockAIProvider::new().with_response("Yes"));
        let id = SessionId::new();

        fx.handler.handle(submit(id, "  Alice \n")).await.unwrap();

        let state = fx.sessions.get(id).await.unwrap().unwrap();
        assert_eq!(state.answers.get("name"), Some("Alice"));
    }

    #[tokio::test]
    async fn empty_catalog_reports_already_complete() {
        let fx = fixture_with(QuestionCatalog::default(), MockAIProvider::new());
        let id = SessionId::new();

        let result = fx.handler.handle(submit(id, "hello")).await.unwrap();

        assert_eq!(result.outcome, SubmitOutcome::AlreadyComplete);
        assert_eq!(
            result.reply,
            "✅ All questions already answered. You may reset to start again."
        );
        assert_eq!(fx.ai.call_count(), 0);
        assert!(!fx.answers.exists().await.unwrap());
    }

    #[tokio::test]
    async fn session_restarts_after_completion() {
        let fx = fixture(MockAIProvider::new());
        let id = SessionId::new();
        fx.handler.handle(submit(id, "Alice")).await.unwrap();
        fx.handler.handle(submit(id, "thirty")).await.unwrap();

        let result = fx.handler.handle(submit(id, "Bob")).await.unwrap();

        assert_eq!(result.outcome, SubmitOutcome::Accepted { next_index: 1 });
        let saved = fx.answers.load().await.unwrap();
        assert_eq!(saved.get("name"), Some("Alice"));
    }

    #[tokio::test]
    async fn failing_fill_still_persists_answers_and_clears_session() {
        let fx = fixture(MockAIProvider::new());
        std::fs::remove_file(fx.dir.path().join("form.txt")).unwrap();
        let id = SessionId::new();
        fx.handler.handle(submit(id, "Alice")).await.unwrap();

        let err = fx.handler.handle(submit(id, "thirty")).await.unwrap_err();

        assert!(matches!(
            err,
            SubmitAnswerError::Fill(DocumentFillError::TemplateNotFound(_))
        ));
        assert_eq!(fx.answers.load().await.unwrap().len(), 2);
        assert!(fx.sessions.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sessions_do_not_share_progress() {
        let fx = fixture(MockAIProvider::new());
        let a = SessionId::new();
        let b = SessionId::new();

        fx.handler.handle(submit(a, "Alice")).await.unwrap();
        let result = fx.handler.handle(submit(b, "Bob")).await.unwrap();

        assert_eq!(result.outcome, SubmitOutcome::Accepted { next_index: 1 });
        let state_a = fx.sessions.get(a).await.unwrap().unwrap();
        let state_b = fx.sessions.get(b).await.unwrap().unwrap();
        assert_eq!(state_a.answers.get("name"), Some("Alice"));
        assert_eq!(state_b.answers.get("name"), Some("Bob"));
    }
}
