//! Prompt builder: fixed system message + grounding template.

/// System message sent with every completion.
pub const SYSTEM_PROMPT: &str = "You are a helpful regulatory compliance assistant.";

/// Reply the model is told to give when the context does not cover the question.
pub const INSUFFICIENT_CONTEXT_REPLY: &str =
    "I don't have enough information to answer this question.";

/// Separator placed between retrieved documents.
pub const DOC_SEPARATOR: &str = "\n\n";

/// Joins retrieved documents into one context block, keeping retrieval order.
pub fn build_context(docs: &[String]) -> String {
    docs.join(DOC_SEPARATOR)
}

/// Build the user prompt: instructions, context block, then the question verbatim.
///
/// # Example
/// ```
/// # use contextor::prompt::build_user_prompt;
/// let docs = vec!["GDPR is a regulation.".to_string()];
/// let prompt = build_user_prompt("What is GDPR?", &docs);
/// assert!(prompt.contains("GDPR is a regulation."));
/// assert!(prompt.contains("What is GDPR?"));
/// ```
pub fn build_user_prompt(question: &str, docs: &[String]) -> String {
    let context = build_context(docs);
    format!(
        "You are a regulatory compliance assistant.\n\
         Answer strictly based on the context below.\n\
         If the context doesn't contain the answer, say \"{INSUFFICIENT_CONTEXT_REPLY}\"\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question:\n\
         {question}\n\
         Answer: "
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_joined_by_blank_line_in_order() {
        let docs = vec![
            "Article 5 covers principles.".to_string(),
            "Article 6 covers lawfulness.".to_string(),
            "Article 7 covers consent.".to_string(),
        ];
        let prompt = build_user_prompt("Which article covers consent?", &docs);

        let joined = "Article 5 covers principles.\n\nArticle 6 covers lawfulness.\n\nArticle 7 covers consent.";
        assert!(prompt.contains(joined));
        assert!(prompt.contains("Which article covers consent?"));

        let question_at = prompt.find("Question:").unwrap();
        let context_at = prompt.find("Context:").unwrap();
        assert!(context_at < question_at);
    }

    #[test]
    fn question_is_not_rewritten() {
        let q = "  what   about   \"DORA\"?  ";
        let prompt = build_user_prompt(q, &["x".to_string()]);
        assert!(prompt.contains(q));
    }

    #[test]
    fn refusal_instruction_present() {
        let prompt = build_user_prompt("q", &["x".to_string()]);
        assert!(prompt.contains(INSUFFICIENT_CONTEXT_REPLY));
        assert!(prompt.trim_end().ends_with("Answer:"));
    }
}
