use std::sync::Arc;

use ai_llm_service::{ChatCompletionService, config_chat_from_env};
use contextor::{Answerer, GroundedAnswerer};
use rag_base::{IndexRetriever, Retriever, SearchIndexClient, SearchIndexConfig};

use crate::core::config::ApiConfig;
use crate::error_handler::AppError;

/// Shared state for all HTTP handlers.
///
/// Clients are built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub retriever: Arc<dyn Retriever>,
    pub answerer: Arc<dyn Answerer>,
    /// How many documents `/ask` requests from the index.
    pub top_k: usize,
    /// Parsed per upload, so a bad value fails that request only.
    pub storage_connection_string: Option<String>,
    pub container_name: String,
}

impl AppState {
    /// Builds the search and completion clients from the environment.
    ///
    /// # Errors
    /// Missing or invalid `SEARCH_*` / `OPENAI_*` settings.
    pub fn from_env(cfg: &ApiConfig) -> Result<Self, AppError> {
        let search = SearchIndexClient::new(SearchIndexConfig::from_env()?)?;
        let retriever = IndexRetriever::new(Arc::new(search));
        let top_k = retriever.default_top();

        let chat = ChatCompletionService::new(config_chat_from_env()?)?;
        let answerer = GroundedAnswerer::new(Arc::new(chat));

        Ok(Self {
            retriever: Arc::new(retriever),
            answerer: Arc::new(answerer),
            top_k,
            storage_connection_string: cfg.storage_connection_string.clone(),
            container_name: cfg.container_name.clone(),
        })
    }
}
