//! Grounded answer synthesis.
//!
//! Public API: [`Answerer`] and its completion-backed implementation
//! [`GroundedAnswerer`]. The answerer joins the retrieved documents into a
//! context block, wraps it in a fixed compliance-assistant template, and asks
//! the completion service once. With no documents it answers with
//! [`NO_DOCUMENTS_ANSWER`] and makes no call.

mod answerer;
mod api_types;
mod error;
mod llm;
pub mod prompt;

pub use answerer::{Answerer, GroundedAnswerer};
pub use api_types::{AnswerOutcome, ERROR_ANSWER_PREFIX, NO_DOCUMENTS_ANSWER};
pub use error::ContextorError;
pub use llm::ChatCompletion;
