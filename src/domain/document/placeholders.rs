//! Placeholder substitution.
//!
//! Replaces `{{key}}` tokens with answer values in a single left-to-right
//! pass. Inserted values are never rescanned, so a value that itself
//! contains a token is emitted literally.

use std::borrow::Cow;

use crate::domain::questionnaire::AnswerSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Finds the longest answer token starting at the beginning of `rest`.
fn match_token<'a>(rest: &str, answers: &'a AnswerSet) -> Option<(usize, &'a str)> {
    answers
        .iter()
        .filter(|(key, _)| {
            rest.len() >= key.len() + OPEN.len() + CLOSE.len()
                && rest[OPEN.len()..].starts_with(key)
                && rest[OPEN.len() + key.len()..].starts_with(CLOSE)
        })
        .map(|(key, value)| (OPEN.len() + key.len() + CLOSE.len(), value))
        .max_by_key(|(len, _)| *len)
}

/// Substitutes every `{{key}}` in `text` with its answer.
///
/// Tokens whose key has no answer are left untouched. Returns the input
/// unchanged (borrowed) when nothing was replaced.
pub fn substitute<'a>(text: &'a str, answers: &AnswerSet) -> Cow<'a, str> {
    if answers.is_empty() || !text.contains(OPEN) {
        return Cow::Borrowed(text);
    }

    let mut output = String::with_capacity(text.len());
    let mut replaced = false;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(OPEN) {
        let start = cursor + offset;
        match match_token(&text[start..], answers) {
            Some((token_len, value)) => {
                output.push_str(&text[cursor..start]);
                output.push_str(value);
                cursor = start + token_len;
                replaced = true;
            }
            None => {
                // Step past one brace so overlapping candidates such as
                // `{{{name}}` are still considered.
                output.push_str(&text[cursor..start + 1]);
                cursor = start + 1;
            }
        }
    }

    if !replaced {
        return Cow::Borrowed(text);
    }

    output.push_str(&text[cursor..]);
    Cow::Owned(output)
}
