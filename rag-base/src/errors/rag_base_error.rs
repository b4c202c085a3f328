//! Unified error type for the rag-base crate.

use thiserror::Error;

/// Errors produced by the retrieval layer.
#[derive(Debug, Error)]
pub enum RagBaseError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Required environment variable is missing.
    #[error("missing env variable: {key}")]
    EnvMissing { key: String },

    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Search service / transport ──────────────────────────────────────────
    /// Network or client error while calling the search service.
    #[error("search transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The search service answered with a non-2xx status.
    #[error("search service returned HTTP {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    /// The search response could not be decoded.
    #[error("failed to decode search response: {0}")]
    Decode(String),
}
