//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// Fixed answer when retrieval produced nothing to ground on.
pub const NO_DOCUMENTS_ANSWER: &str = "No relevant documents found to answer your question.";

/// Prefix of the answer returned when the completion call fails.
pub const ERROR_ANSWER_PREFIX: &str = "Error generating answer:";

/// What the answerer actually did for a question.
///
/// # Example
/// ```
/// use contextor::{AnswerOutcome, NO_DOCUMENTS_ANSWER};
/// assert_eq!(AnswerOutcome::NoContext.into_answer(), NO_DOCUMENTS_ANSWER);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The completion service produced this text.
    Generated(String),
    /// No documents were supplied; the completion service was not called.
    NoContext,
}

impl AnswerOutcome {
    /// Renders the outcome as the user-facing answer string.
    pub fn into_answer(self) -> String {
        match self {
            AnswerOutcome::Generated(text) => text,
            AnswerOutcome::NoContext => NO_DOCUMENTS_ANSWER.to_string(),
        }
    }
}
