//! User-facing reply texts.

pub const EMPTY_INPUT: &str = "Please enter a message.";
pub const ALL_ANSWERED: &str = "✅ All questions have been answered. Thank you!";
pub const ALREADY_COMPLETE: &str = "✅ All questions already answered. You may reset to start again.";
pub const CONVERSATION_RESET: &str = "Conversation reset.";
pub const DOCUMENT_GENERATED: &str = "Document generated successfully.";

/// Acknowledges an accepted answer and asks the next question.
pub fn next_question(prompt: &str) -> String {
    format!("✅ Got it. Now, {}", prompt)
}

/// Asks the same question again after a rejected answer.
pub fn retry_question(prompt: &str) -> String {
    format!("❌ Sorry, your answer wasn’t clear. Please try again: {}", prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_are_embedded_verbatim() {
        assert_eq!(next_question("Age?"), "✅ Got it. Now, Age?");
        assert_eq!(
            retry_question("Name?"),
            "❌ Sorry, your answer wasn’t clear. Please try again: Name?"
        );
    }
}
