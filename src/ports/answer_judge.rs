//! Answer Judge Port - Decides whether a free-text answer is acceptable.
//!
//! The questionnaire engine depends only on this trait. The production
//! implementation asks an LLM; tests substitute scripted verdicts.

use async_trait::async_trait;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::{ExchangeTurn, JudgeVerdict};

use super::AIError;

/// Port for judging a candidate answer.
#[async_trait]
pub trait AnswerJudge: Send + Sync {
    /// Judge the exchange (question + candidate answer) for one session.
    ///
    /// # Errors
    ///
    /// Returns `JudgeError` when the judging service cannot produce a reply.
    async fn judge(
        &self,
        session_id: SessionId,
        exchange: &[ExchangeTurn],
    ) -> Result<JudgeVerdict, JudgeError>;
}

/// Errors raised while judging an answer.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The backing provider failed.
    #[error(transparent)]
    Provider(#[from] AIError),

    /// Nothing to judge.
    #[error("judge exchange is empty")]
    EmptyExchange,
}
