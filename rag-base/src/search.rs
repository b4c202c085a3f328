//! Search index client: a single full-text query against the managed index.
//!
//! `POST {endpoint}/indexes/{index}/docs/search?api-version={v}` with the raw
//! question as `search` and `top` as the result cap. No query rewriting,
//! filters, or semantic options are applied.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::errors::rag_base_error::RagBaseError;
use crate::structs::rag_base_config::SearchIndexConfig;
use crate::structs::search_result::SearchResponse;

/// Long-lived handle to the search index, built once at startup.
#[derive(Debug)]
pub struct SearchIndexClient {
    http: reqwest::Client,
    cfg: SearchIndexConfig,
    url_search: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    search: &'a str,
    top: usize,
}

impl SearchIndexClient {
    /// Builds the client and its HTTP connection pool.
    ///
    /// # Errors
    /// - [`RagBaseError::InvalidConfig`] if the API key cannot be used as a header
    /// - [`RagBaseError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: SearchIndexConfig) -> Result<Self, RagBaseError> {
        let mut key = header::HeaderValue::from_str(&cfg.api_key)
            .map_err(|e| RagBaseError::InvalidConfig(format!("SEARCH_KEY is not a valid header: {e}")))?;
        key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::HeaderName::from_static("api-key"), key);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_search = format!(
            "{}/indexes/{}/docs/search?api-version={}",
            cfg.endpoint.trim_end_matches('/'),
            cfg.index_name,
            cfg.api_version
        );

        info!(
            target: "rag_base::search",
            endpoint = %cfg.endpoint,
            index = %cfg.index_name,
            top_k = cfg.top_k,
            "SearchIndexClient initialized"
        );

        Ok(Self {
            http,
            cfg,
            url_search,
        })
    }

    /// Returns the config this client was built from.
    pub fn config(&self) -> &SearchIndexConfig {
        &self.cfg
    }

    /// Runs one search and returns the `content` of each hit, in ranking order.
    ///
    /// # Errors
    /// - [`RagBaseError::Transport`] on network/client failures
    /// - [`RagBaseError::HttpStatus`] for non-2xx answers (bad key, unknown index, ...)
    /// - [`RagBaseError::Decode`] if the body is not a search response
    #[instrument(skip_all, fields(index = %self.cfg.index_name, top = top))]
    pub async fn search_contents(&self, query: &str, top: usize) -> Result<Vec<String>, RagBaseError> {
        let started = Instant::now();
        debug!(
            target: "rag_base::search",
            query_len = query.len(),
            "POST docs/search"
        );

        let resp = self
            .http
            .post(&self.url_search)
            .json(&SearchRequest { search: query, top })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(240).collect();
            error!(
                target: "rag_base::search",
                %status,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "search returned non-success status"
            );
            return Err(RagBaseError::HttpStatus {
                status: status.as_u16(),
                snippet,
            });
        }

        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| RagBaseError::Decode(e.to_string()))?;

        let hits = body.value.len();
        let contents = body.into_contents();

        info!(
            target: "rag_base::search",
            hits,
            with_content = contents.len(),
            latency_ms = started.elapsed().as_millis(),
            "search completed"
        );

        Ok(contents)
    }
}
