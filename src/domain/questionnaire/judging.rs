//! Answer judging protocol.
//!
//! The judge is asked a single yes/no question about one question/answer
//! pair. Only an exact (trimmed, case-insensitive) `yes` counts as valid.

use serde::{Deserialize, Serialize};

/// System instructions sent with every judge request.
pub const JUDGE_SYSTEM_PROMPT: &str = "You are a helpful assistant that validates user answers \
to questions. You must reply with only one word: Yes or No. Do not include any explanation, \
don't be too strict to validate";

/// Builds the judge-facing turn for one question/answer pair.
pub fn judge_request(prompt: &str, answer: &str) -> String {
    format!(
        "User was asked: '{}'\nUser answered: '{}'\nIs this a valid and complete answer? Reply only Yes or No.",
        prompt, answer
    )
}

/// Binary judgment on a candidate answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeVerdict {
    Valid,
    Invalid,
}

impl JudgeVerdict {
    /// Interprets a raw judge reply.
    pub fn from_reply(reply: &str) -> Self {
        if reply.trim().eq_ignore_ascii_case("yes") {
            JudgeVerdict::Valid
        } else {
            JudgeVerdict::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, JudgeVerdict::Valid)
    }
}
