//! Public API:
//! - [`SearchIndexClient`]: one full-text query against the managed search index.
//! - [`Retriever`] / [`IndexRetriever`]: question → ordered document snippets,
//!   with failures folded into an empty result.

pub mod errors;
pub mod retriever;
pub mod search;
pub mod structs;

pub use errors::rag_base_error::RagBaseError;
pub use retriever::{IndexRetriever, Retriever};
pub use search::SearchIndexClient;
pub use structs::rag_base_config::SearchIndexConfig;
