use crate::error_handler::{ConfigError, Provider};

/// Represents the backend used for chat completions.
///
/// Both variants speak the OpenAI chat-completions wire format; they differ
/// in URL layout and authentication header.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// assert_eq!(LlmProvider::parse("azure").unwrap(), LlmProvider::AzureOpenAI);
/// assert_eq!(LlmProvider::parse("OpenAI").unwrap(), LlmProvider::OpenAI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LlmProvider {
    /// Azure OpenAI: `{endpoint}/openai/deployments/{model}/chat/completions`, `api-key` header.
    #[default]
    AzureOpenAI,
    /// OpenAI-compatible API: `{endpoint}/v1/chat/completions`, Bearer token.
    OpenAI,
}

impl LlmProvider {
    /// Parses a provider name (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for unknown names.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_lowercase().as_str() {
            "azure" | "azure_openai" | "azureopenai" => Ok(LlmProvider::AzureOpenAI),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl From<LlmProvider> for Provider {
    fn from(p: LlmProvider) -> Self {
        match p {
            LlmProvider::AzureOpenAI => Provider::AzureOpenAI,
            LlmProvider::OpenAI => Provider::OpenAI,
        }
    }
}
