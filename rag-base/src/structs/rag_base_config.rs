//! Configuration layer: reads search-service settings from environment
//! variables and exposes a strongly typed config for the retriever.

use crate::errors::rag_base_error::RagBaseError;

pub const DEFAULT_INDEX_NAME: &str = "indexbot";
pub const DEFAULT_API_VERSION: &str = "2023-11-01";
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Search index connectivity and query knobs.
#[derive(Clone)]
pub struct SearchIndexConfig {
    /// Service endpoint, e.g. "https://my-search.search.windows.net".
    pub endpoint: String,
    /// Admin or query key sent as the `api-key` header.
    pub api_key: String,
    /// Index to query (e.g. "indexbot").
    pub index_name: String,
    /// REST `api-version` query value.
    pub api_version: String,
    /// Default number of documents requested per question.
    pub top_k: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SearchIndexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndexConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("api_version", &self.api_version)
            .field("top_k", &self.top_k)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SearchIndexConfig {
    /// Build configuration from the process environment.
    ///
    /// Environment variables used:
    /// - `SEARCH_ENDPOINT` (required)
    /// - `SEARCH_KEY` (required)
    /// - `SEARCH_INDEX_NAME` (default: "indexbot")
    /// - `SEARCH_API_VERSION` (default: "2023-11-01")
    /// - `SEARCH_TOP_K` (default: 5)
    /// - `SEARCH_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, RagBaseError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`SearchIndexConfig::from_env`] but reads through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RagBaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = required(&lookup, "SEARCH_ENDPOINT")?;
        let api_key = required(&lookup, "SEARCH_KEY")?;

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(RagBaseError::InvalidConfig(
                "SEARCH_ENDPOINT must start with http:// or https://".into(),
            ));
        }

        let index_name =
            optional(&lookup, "SEARCH_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.into());
        let api_version =
            optional(&lookup, "SEARCH_API_VERSION").unwrap_or_else(|| DEFAULT_API_VERSION.into());
        let top_k = read_parsed::<usize, _>(&lookup, "SEARCH_TOP_K")?.unwrap_or(DEFAULT_TOP_K);
        let timeout_secs =
            read_parsed::<u64, _>(&lookup, "SEARCH_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

        if top_k == 0 {
            return Err(RagBaseError::InvalidConfig(
                "SEARCH_TOP_K must be > 0".into(),
            ));
        }

        Ok(Self {
            endpoint,
            api_key,
            index_name,
            api_version,
            top_k,
            timeout_secs,
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, RagBaseError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| RagBaseError::EnvMissing { key: key.into() })
}

/// Read an optional value of type `T`; unset means `Ok(None)`.
fn read_parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>, RagBaseError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, key) {
        Some(v) => v.parse::<T>().map(Some).map_err(|_| RagBaseError::EnvParse {
            key: key.into(),
            value: v,
        }),
        None => Ok(None),
    }
}
