//! Question catalog - the ordered, immutable list of questions.
//!
//! A catalog document has the shape
//!
//! ```json
//! { "questions": [ { "q0": "What is your name?", "q0_type": "name" }, ... ] }
//! ```
//!
//! Each entry carries one display key mapped to the prompt text, plus an
//! optional `<key>_type` field naming the persistence key the answer is
//! stored under. Entries without a type field fall back to `type_<index>`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// Suffix that marks a type-annotation key. Never selected as a display key.
pub const TYPE_SUFFIX: &str = "_type";

/// A single question in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRecord {
    /// Display key, e.g. `q2`.
    pub key: String,
    /// Prompt text shown to the user.
    pub prompt: String,
    /// Persistence key the answer is stored under.
    pub answer_type: String,
}

impl QuestionRecord {
    pub fn new(
        key: impl Into<String>,
        prompt: impl Into<String>,
        answer_type: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
            answer_type: answer_type.into(),
        }
    }

    /// Persistence key used when an entry has no `<key>_type` field.
    pub fn default_answer_type(index: usize) -> String {
        format!("type_{}", index)
    }

    /// Builds a record from one catalog entry at `index`.
    fn from_entry(index: usize, entry: &Map<String, Value>) -> Result<Self, ValidationError> {
        let field = format!("questions[{}]", index);

        let key = entry
            .keys()
            .find(|k| !k.ends_with(TYPE_SUFFIX))
            .ok_or_else(|| ValidationError::invalid_format(&field, "no question key"))?;

        let prompt = entry
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ValidationError::invalid_format(format!("{}.{}", field, key), "prompt must be a string")
            })?;
        if prompt.trim().is_empty() {
            return Err(ValidationError::empty_field(format!("{}.{}", field, key)));
        }

        let type_key = format!("{}{}", key, TYPE_SUFFIX);
        let answer_type = match entry.get(&type_key) {
            None => Self::default_answer_type(index),
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::String(_)) => {
                return Err(ValidationError::empty_field(format!("{}.{}", field, type_key)))
            }
            Some(_) => {
                return Err(ValidationError::invalid_format(
                    format!("{}.{}", field, type_key),
                    "type must be a string",
                ))
            }
        };

        Ok(Self::new(key.clone(), prompt, answer_type))
    }
}

/// Ordered, index-addressable list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuestionCatalog {
    questions: Vec<QuestionRecord>,
}

impl QuestionCatalog {
    /// Creates a catalog from records, rejecting duplicate display keys.
    pub fn new(questions: Vec<QuestionRecord>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.key.as_str()) {
                return Err(ValidationError::duplicate("key", &question.key));
            }
        }
        Ok(Self { questions })
    }

    /// Parses a catalog document (`{"questions": [...]}`) already decoded
    /// into a JSON value. Key order inside each entry is significant.
    pub fn from_value(document: &Value) -> Result<Self, ValidationError> {
        let entries = document
            .get("questions")
            .and_then(Value::as_array)
            .ok_or_else(|| ValidationError::invalid_format("questions", "expected an array"))?;

        let questions = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let map = entry.as_object().ok_or_else(|| {
                    ValidationError::invalid_format(
                        format!("questions[{}]", index),
                        "expected an object",
                    )
                })?;
                QuestionRecord::from_entry(index, map)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(questions)
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&QuestionRecord> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.questions.iter()
    }

    /// Persistence keys that appear on more than one question.
    ///
    /// Not an error: a later answer simply overwrites an earlier one.
    pub fn shared_answer_types(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut shared = Vec::new();
        for question in &self.questions {
            if !seen.insert(question.answer_type.as_str()) && !shared.contains(&question.answer_type.as_str()) {
                shared.push(question.answer_type.as_str());
            }
        }
        shared
    }
}
