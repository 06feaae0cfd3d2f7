//! Aid Intake - Conversational eligibility questionnaire
//!
//! This crate walks a user through a fixed list of questions, checks each
//! answer with an LLM judge, stores the completed answers and fills them into
//! a document template the user can download.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
