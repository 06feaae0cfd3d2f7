//! Storage Adapters
//!
//! ## Available Adapters
//!
//! - **InMemorySessionStore** - Per-session questionnaire state in memory
//! - **FileAnswerSetRepository** - The completed answer set as a JSON file
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileAnswerSetRepository, InMemorySessionStore};
//!
//! let sessions = InMemorySessionStore::new();
//! let answers = FileAnswerSetRepository::new("answers.json");
//! ```

mod file_answer_repository;
mod in_memory_session_store;

pub use file_answer_repository::FileAnswerSetRepository;
pub use in_memory_session_store::InMemorySessionStore;
