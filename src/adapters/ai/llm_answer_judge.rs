//! LLM Answer Judge - Adapts any `AIProvider` to the `AnswerJudge` port.
//!
//! Sends the fixed judging system prompt plus the pending exchange and reads
//! the one-word reply.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::{ExchangeTurn, JudgeVerdict, JUDGE_SYSTEM_PROMPT};
use crate::ports::{AIProvider, AnswerJudge, CompletionRequest, JudgeError};

/// Room for "Yes"/"No" plus stray punctuation.
const JUDGE_MAX_TOKENS: u32 = 5;

/// Judge backed by a chat-completion provider.
pub struct LlmAnswerJudge {
    provider: Arc<dyn AIProvider>,
}

impl LlmAnswerJudge {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    fn build_request(session_id: SessionId, exchange: &[ExchangeTurn]) -> CompletionRequest {
        CompletionRequest::for_session(session_id)
            .with_system_prompt(JUDGE_SYSTEM_PROMPT)
            .with_max_tokens(JUDGE_MAX_TOKENS)
            .with_temperature(0.0)
            .with_turns(exchange)
    }
}

#[async_trait]
impl AnswerJudge for LlmAnswerJudge {
    async fn judge(
        &self,
        session_id: SessionId,
        exchange: &[ExchangeTurn],
    ) -> Result<JudgeVerdict, JudgeError> {
        if exchange.is_empty() {
            return Err(JudgeError::EmptyExchange);
        }

        let request = Self::build_request(session_id, exchange);
        let request_id = request.request_id;
        let response = self.provider.complete(request).await?;

        let verdict = JudgeVerdict::from_reply(&response.content);
        debug!(
            session_id = %session_id,
            request_id = %request_id,
            model = %response.model,
            reply = %response.content.trim(),
            ?verdict,
            "Judge replied"
        );

        Ok(verdict)
    }
}
