//! Completion seam between the answerer and the chat-completion client.

use std::{future::Future, pin::Pin};

use ai_llm_service::{AiLlmError, ChatCompletionService};

/// Anything that can turn a `(prompt, system)` pair into assistant text.
///
/// Implemented for [`ChatCompletionService`]; tests plug in stubs.
pub trait ChatCompletion: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;
}

impl ChatCompletion for ChatCompletionService {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>> {
        Box::pin(self.generate(prompt, system))
    }
}
