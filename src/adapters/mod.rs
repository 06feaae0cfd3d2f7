//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - OpenAI chat completions and the LLM-backed answer judge
//! - `catalog` - Question catalog files (JSON or YAML)
//! - `document` - Template renderers and local file storage
//! - `http` - Axum REST endpoints
//! - `scheduling` - Delayed deletion of generated files
//! - `storage` - Session state and the persisted answer set

pub mod ai;
pub mod catalog;
pub mod document;
pub mod http;
pub mod scheduling;
pub mod storage;

pub use ai::{LlmAnswerJudge, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use catalog::{load_catalog, CatalogLoadError};
pub use document::{renderer_for, LocalArtifactStorage};
pub use http::{app_router, DownloadSettings, QuestionnaireAppState};
pub use scheduling::TokioDeletionScheduler;
pub use storage::{FileAnswerSetRepository, InMemorySessionStore};
