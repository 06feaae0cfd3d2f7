//! AI Provider Adapters.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat-completion models (GPT-4o)
//! - `MockAIProvider` - Configurable mock for testing
//! - `LlmAnswerJudge` - `AnswerJudge` on top of any `AIProvider`

mod llm_answer_judge;
mod mock_provider;
mod openai_provider;

pub use llm_answer_judge::LlmAnswerJudge;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
