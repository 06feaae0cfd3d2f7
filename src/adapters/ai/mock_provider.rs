//! Scripted AI provider for tests.
//!
//! Replies are queued up front (or pushed later through a shared clone) and
//! handed out in order. Once the script runs dry every call answers "Yes", so
//! a test only has to script the turns it cares about.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse};

const FALLBACK_REPLY: &str = "Yes";
const MOCK_MODEL: &str = "mock-judge";

/// One scripted outcome.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Reply(String),
    Fail(MockError),
}

/// Provider failures a test can inject.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// Clones share the script and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    latency: Duration,
}

// A poisoned lock means an earlier test thread panicked; the data is still usable.
fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push_reply(content);
        self
    }

    pub fn with_error(self, error: MockError) -> Self {
        self.push_error(error);
        self
    }

    /// Every call sleeps this long before answering.
    pub fn with_delay(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn push_reply(&self, content: impl Into<String>) {
        guard(&self.script).push_back(MockResponse::Reply(content.into()));
    }

    pub fn push_error(&self, error: MockError) {
        guard(&self.script).push_back(MockResponse::Fail(error));
    }

    pub fn call_count(&self) -> usize {
        guard(&self.calls).len()
    }

    /// Requests seen so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        guard(&self.calls).clone()
    }

    fn next_scripted(&self) -> MockResponse {
        guard(&self.script)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Reply(FALLBACK_REPLY.to_string()))
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        guard(&self.calls).push(request);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.next_scripted() {
            MockResponse::Reply(content) => Ok(CompletionResponse::new(content, MOCK_MODEL)),
            MockResponse::Fail(err) => Err(err.into()),
        }
    }
}
