//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The completion service failed (transport, auth, quota, decoding).
    #[error(transparent)]
    Completion(#[from] AiLlmError),
}
