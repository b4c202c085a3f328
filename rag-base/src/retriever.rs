//! Retriever seam used by the gateway.
//!
//! [`Retriever::retrieve`] never fails: any search failure is logged and
//! reported as "no documents". Callers that need to tell the two apart use
//! [`IndexRetriever::try_retrieve`].

use std::{future::Future, pin::Pin, sync::Arc};

use tracing::{error, warn};

use crate::errors::rag_base_error::RagBaseError;
use crate::search::SearchIndexClient;

/// Provider interface for document retrieval.
///
/// Implement this trait to plug in another index (or a stub in tests).
pub trait Retriever: Send + Sync {
    /// Returns up to `top` document snippets for `query`, best first.
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
        top: usize,
    ) -> Pin<Box<dyn Future<Output = Vec<String>> + Send + 'a>>;
}

/// Retriever backed by the managed search index.
#[derive(Debug, Clone)]
pub struct IndexRetriever {
    client: Arc<SearchIndexClient>,
}

impl IndexRetriever {
    pub fn new(client: Arc<SearchIndexClient>) -> Self {
        Self { client }
    }

    /// Default `top` configured for this index.
    pub fn default_top(&self) -> usize {
        self.client.config().top_k
    }

    /// Same as [`Retriever::retrieve`] but keeps the failure visible.
    ///
    /// # Errors
    /// Propagates [`RagBaseError`] from the search call.
    pub async fn try_retrieve(&self, query: &str, top: usize) -> Result<Vec<String>, RagBaseError> {
        self.client.search_contents(query, top).await
    }
}

impl Retriever for IndexRetriever {
    fn retrieve<'a>(
        &'a self,
        query: &'a str,
        top: usize,
    ) -> Pin<Box<dyn Future<Output = Vec<String>> + Send + 'a>> {
        Box::pin(async move {
            match self.try_retrieve(query, top).await {
                Ok(docs) => {
                    if docs.is_empty() {
                        warn!(target: "rag_base::retriever", "search returned no documents with content");
                    }
                    docs
                }
                Err(err) => {
                    error!(target: "rag_base::retriever", error = %err, "search error");
                    Vec::new()
                }
            }
        })
    }
}
