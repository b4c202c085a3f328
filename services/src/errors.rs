//! Error type for the blob storage client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobStorageError {
    /// A `key=value` segment without `=`.
    #[error("malformed connection string segment: '{0}'")]
    MalformedSegment(String),

    /// A setting the connection string must carry is absent.
    #[error("connection string is missing {0}")]
    MissingSetting(&'static str),

    /// Neither `AccountKey` nor `SharedAccessSignature` was provided.
    #[error("connection string carries no credential (AccountKey or SharedAccessSignature)")]
    MissingCredential,

    #[error("AccountKey is not valid base64: {0}")]
    InvalidAccountKey(String),

    #[error("invalid blob endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("invalid blob name: {0}")]
    InvalidBlobName(String),

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("blob transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The storage service rejected the request.
    #[error("blob service returned HTTP {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },
}
