//! POST /upload: stores one multipart file in the document container.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use services::BlobStorageClient;
use tracing::{error, info, warn};

use crate::{
    core::app_state::AppState, error_handler::UploadError,
    routes::upload::upload_response::UploadResponse,
};

/// Multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

/// Handler: POST /upload
///
/// The blob is named after the uploaded filename and replaces any existing
/// blob of that name. Every failure is a `200 {"error": ...}` payload.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/upload -F 'file=@gdpr.pdf'
/// ```
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let result = store_upload(&state, multipart).await;
    match &result {
        Ok(resp) => info!(target: "api::upload", filename = %resp.filename, "upload finished"),
        Err(UploadError::StorageNotConfigured) => {
            warn!(target: "api::upload", "upload rejected: storage not configured")
        }
        Err(err) => error!(target: "api::upload", error = %err, "upload failed"),
    }
    result.map(Json)
}

async fn store_upload(state: &AppState, mut multipart: Multipart) -> Result<UploadResponse, UploadError> {
    // Checked before the body is read.
    let conn = state
        .storage_connection_string
        .as_deref()
        .ok_or(UploadError::StorageNotConfigured)?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .ok_or(UploadError::MissingFilename)?;

        let data = field.bytes().await?;
        info!(target: "api::upload", filename = %filename, size = data.len(), "file received");

        let client = BlobStorageClient::from_connection_string(conn)?;
        let blob = client
            .upload_blob(&state.container_name, &filename, data)
            .await?;
        return Ok(UploadResponse::uploaded(blob.name));
    }

    Err(UploadError::NoFile)
}
