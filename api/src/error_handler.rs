use ai_llm_service::AiLlmError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rag_base::RagBaseError;
use serde::Serialize;
use services::BlobStorageError;
use thiserror::Error;

/// Startup errors. Any of these stops the process.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error(transparent)]
    Search(#[from] RagBaseError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    // --- IO / server ---
    #[error("failed to bind listener on {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),
}

/// Upload failures. Rendered as `200 {"error": "..."}`, which is what the
/// web client checks for.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Storage not configured")]
    StorageNotConfigured,

    #[error("No file provided")]
    NoFile,

    #[error("Missing filename")]
    MissingFilename,

    #[error("{0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    Storage(#[from] BlobStorageError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}
