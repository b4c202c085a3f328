//! Completion-service client used to synthesize grounded answers.
//!
//! - [`config`] builds an [`LlmModelConfig`] from the environment.
//! - [`services::chat_completion_service::ChatCompletionService`] performs
//!   non-streaming chat completions against Azure OpenAI (or a plain
//!   OpenAI-compatible endpoint).
//! - [`error_handler`] holds the crate-wide [`AiLlmError`].

pub mod config;
pub mod error_handler;
pub mod services;

pub use config::default_config::config_chat_from_env;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::AiLlmError;
pub use services::chat_completion_service::ChatCompletionService;
