use crate::config::llm_provider::LlmProvider;

/// Configuration for a chat-completion model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to use (Azure OpenAI or OpenAI-compatible).
/// - `model`: Deployment name on Azure, model id elsewhere (e.g. `"gpt-4o-mini"`).
/// - `endpoint`: Base URL of the resource (e.g. `https://my-res.openai.azure.com`).
/// - `api_key`: Secret used for the `api-key` header or Bearer token.
/// - `api_version`: Azure `api-version` query value; ignored for OpenAI.
/// - `max_tokens`: Maximum number of tokens to generate.
/// - `temperature`: Sampling temperature.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::AzureOpenAI,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://my-res.openai.azure.com".to_string(),
///     api_key: "secret".to_string(),
///     api_version: Some("2024-02-01".to_string()),
///     max_tokens: Some(800),
///     temperature: Some(0.3),
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.model, "gpt-4o-mini");
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The backend (Azure OpenAI or OpenAI).
    pub provider: LlmProvider,

    /// Deployment/model identifier.
    pub model: String,

    /// Inference endpoint base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: String,

    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
