use serde::Serialize;

/// Success payload for /upload. Failures use [`crate::UploadError`].
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
}

impl UploadResponse {
    pub fn uploaded(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            message: format!("File {filename} uploaded successfully"),
            filename,
        }
    }
}
