//! Gateway settings read from the environment.

use std::env;

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "https://witty-field-023718703.2.azurestaticapps.net",
    "http://localhost:3000",
];
pub const DEFAULT_CONTAINER_NAME: &str = "regulatory-documents";
pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `host:port` to bind.
    pub address: String,
    pub cors_origins: Vec<String>,
    pub upload_max_bytes: usize,
    /// Absent means uploads answer "Storage not configured".
    pub storage_connection_string: Option<String>,
    pub container_name: String,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("address", &self.address)
            .field("cors_origins", &self.cors_origins)
            .field("upload_max_bytes", &self.upload_max_bytes)
            .field(
                "storage_connection_string",
                &self.storage_connection_string.as_ref().map(|_| "<redacted>"),
            )
            .field("container_name", &self.container_name)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cors_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let upload_max_bytes = match get("UPLOAD_MAX_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(AppError::InvalidEnv {
                    key: "UPLOAD_MAX_BYTES",
                    value: raw,
                })?,
            None => DEFAULT_UPLOAD_MAX_BYTES,
        };

        Ok(Self {
            address: get("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into()),
            cors_origins,
            upload_max_bytes,
            storage_connection_string: get("AZURE_STORAGE_CONNECTION_STRING"),
            container_name: get("BLOB_CONTAINER_NAME").unwrap_or_else(|| DEFAULT_CONTAINER_NAME.into()),
        })
    }
}
