//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, error types)
//! - `questionnaire` - Question catalog, session state, answers, judging protocol
//! - `document` - Placeholder substitution and template formats

pub mod document;
pub mod foundation;
pub mod questionnaire;
