//! Default chat-completion config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! Required:
//! - `OPENAI_KEY`      = API key of the completion resource
//! - `OPENAI_ENDPOINT` = base URL (must start with http:// or https://)
//!
//! Optional:
//! - `OPENAI_DEPLOYMENT_NAME` = deployment/model (default `gpt-4o-mini`)
//! - `OPENAI_API_VERSION`     = Azure api-version (default `2024-02-01`)
//! - `LLM_PROVIDER`           = `azure` (default) or `openai`
//! - `LLM_MAX_TOKENS`         = max output tokens (default `800`)
//! - `LLM_TIMEOUT_SECS`       = request timeout (default `60`)
//!
//! Sampling temperature is fixed at [`ANSWER_TEMPERATURE`].

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, must_var, opt_u32, opt_var, validate_http_endpoint,
    },
};

pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o-mini";
pub const DEFAULT_API_VERSION: &str = "2024-02-01";
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const ANSWER_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds the answering model config from the process environment.
///
/// # Errors
/// See [`config_chat_from_lookup`].
pub fn config_chat_from_env() -> Result<LlmModelConfig, AiLlmError> {
    config_chat_from_lookup(|k| std::env::var(k).ok())
}

/// Builds the answering model config from an arbitrary variable source.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if `OPENAI_KEY` or `OPENAI_ENDPOINT` is absent
/// - [`ConfigError::InvalidFormat`] if the endpoint has no http/https scheme
/// - [`ConfigError::InvalidNumber`] for bad numeric knobs
/// - [`ConfigError::UnsupportedProvider`] for an unknown `LLM_PROVIDER`
pub fn config_chat_from_lookup<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(&lookup, "OPENAI_KEY")?;
    let endpoint = must_var(&lookup, "OPENAI_ENDPOINT")?;
    validate_http_endpoint("OPENAI_ENDPOINT", &endpoint)?;

    let provider = match opt_var(&lookup, "LLM_PROVIDER") {
        Some(raw) => LlmProvider::parse(&raw)?,
        None => LlmProvider::default(),
    };

    let model = opt_var(&lookup, "OPENAI_DEPLOYMENT_NAME")
        .unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string());
    if model.is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let api_version =
        opt_var(&lookup, "OPENAI_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

    let max_tokens = opt_u32(&lookup, "LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS);

    let timeout_secs = opt_u32(&lookup, "LLM_TIMEOUT_SECS")?
        .map(u64::from)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        api_version: Some(api_version),
        max_tokens: Some(max_tokens),
        temperature: Some(ANSWER_TEMPERATURE),
        timeout_secs: Some(timeout_secs),
    })
}
