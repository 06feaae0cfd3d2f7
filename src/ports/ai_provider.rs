//! AI Provider Port - Chat completion as seen by the answer judge.
//!
//! A request carries the judging instructions and the exchange turns for one
//! session; the provider answers with a short piece of text. Nothing here
//! knows about verdicts, which are read by the judge adapter.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::SessionId;
use crate::domain::questionnaire::ExchangeTurn;

/// Port for chat-completion backends.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;
}

/// One completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Session on whose behalf the call is made.
    pub session_id: SessionId,
    /// Correlates provider logs with the request that caused them.
    pub request_id: Uuid,
    /// Instructions sent ahead of the turns.
    pub system_prompt: Option<String>,
    pub turns: Vec<ExchangeTurn>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn for_session(session_id: SessionId) -> Self {
        Self {
            session_id,
            request_id: Uuid::new_v4(),
            system_prompt: None,
            turns: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_turn(mut self, turn: ExchangeTurn) -> Self {
        self.turns.push(turn);
        self
    }

    pub fn with_turns<'a>(self, turns: impl IntoIterator<Item = &'a ExchangeTurn>) -> Self {
        turns
            .into_iter()
            .cloned()
            .fold(self, |request, turn| request.with_turn(turn))
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Text produced by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
    /// Model that actually served the call, as reported by the backend.
    pub model: String,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Failures talking to a completion backend.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// The backend answered but the body made no sense.
    #[error("parse error: {0}")]
    Parse(String),

    /// The request was refused before any text was generated.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
