//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Judging
//!
//! - `AIProvider` - Chat-completion LLM providers
//! - `AnswerJudge` - Yes/no verdict on a candidate answer
//!
//! ## State
//!
//! - `SessionStore` - Per-session questionnaire state
//! - `AnswerSetRepository` - The durable answer record
//!
//! ## Documents
//!
//! - `ArtifactStorage` - Template, backup and output files
//! - `TemplateRenderer` - Placeholder filling per template format
//! - `DeletionScheduler` - Delayed removal of generated files

mod ai_provider;
mod answer_judge;
mod answer_repository;
mod artifact_storage;
mod deletion_scheduler;
mod session_store;
mod template_renderer;

pub use ai_provider::{AIError, AIProvider, CompletionRequest, CompletionResponse};
pub use answer_judge::{AnswerJudge, JudgeError};
pub use answer_repository::{AnswerSetError, AnswerSetRepository};
pub use artifact_storage::{ArtifactError, ArtifactStorage};
pub use deletion_scheduler::{DeletionScheduler, ScheduledDeletion};
pub use session_store::{SessionStore, SessionStoreError};
pub use template_renderer::{RenderError, TemplateRenderer};
