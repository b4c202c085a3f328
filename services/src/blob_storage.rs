//! Block blob uploads.
//!
//! One `Put Blob` per file: the whole body in a single request, replacing
//! any existing blob with the same name.

use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::{Url, header};
use tracing::{debug, error, info, instrument};

use crate::connection_string::{StorageAccount, StorageCredential};
use crate::errors::BlobStorageError;
use crate::shared_key::{self, STORAGE_API_VERSION};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);
const CONTENT_TYPE: &str = "application/octet-stream";
const BLOCK_BLOB: &str = "BlockBlob";

/// Result of a successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedBlob {
    pub container: String,
    pub name: String,
    /// Blob URL without any SAS token.
    pub url: String,
    pub etag: Option<String>,
    pub size: usize,
}

#[derive(Debug)]
pub struct BlobStorageClient {
    http: reqwest::Client,
    account: StorageAccount,
}

impl BlobStorageClient {
    /// # Errors
    /// [`BlobStorageError::Transport`] if the HTTP client cannot be built.
    pub fn new(account: StorageAccount) -> Result<Self, BlobStorageError> {
        let http = reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { http, account })
    }

    /// Parses `raw` and builds a client for that account.
    ///
    /// # Errors
    /// Any parse error from [`StorageAccount::from_connection_string`].
    pub fn from_connection_string(raw: &str) -> Result<Self, BlobStorageError> {
        Self::new(StorageAccount::from_connection_string(raw)?)
    }

    /// `{endpoint}/{container}/{name}` with each segment percent-encoded.
    pub fn blob_url(&self, container: &str, name: &str) -> Result<Url, BlobStorageError> {
        if container.is_empty() {
            return Err(BlobStorageError::InvalidBlobName("empty container name".into()));
        }
        if name.is_empty() {
            return Err(BlobStorageError::InvalidBlobName("empty blob name".into()));
        }

        let mut url = self.account.blob_endpoint.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| BlobStorageError::InvalidEndpoint {
                endpoint: self.account.blob_endpoint.to_string(),
                reason: "endpoint cannot carry a path".into(),
            })?
            .pop_if_empty()
            .push(container)
            .push(name);
        Ok(url)
    }

    /// Writes `content` to `container/name` as a block blob, overwriting
    /// any previous version.
    ///
    /// # Errors
    /// - [`BlobStorageError::InvalidBlobName`] for empty names
    /// - [`BlobStorageError::Transport`] on network failures
    /// - [`BlobStorageError::HttpStatus`] when the service rejects the write
    #[instrument(skip_all, fields(container = %container, blob = %name, size = content.len()))]
    pub async fn upload_blob(
        &self,
        container: &str,
        name: &str,
        content: Bytes,
    ) -> Result<UploadedBlob, BlobStorageError> {
        let started = Instant::now();
        let url = self.blob_url(container, name)?;
        let size = content.len();
        let date = shared_key::rfc1123_now();

        let mut request_url = url.clone();
        let mut request = match &self.account.credential {
            StorageCredential::SharedKey { account_name, key } => {
                let sts = shared_key::string_to_sign(
                    "PUT",
                    size,
                    CONTENT_TYPE,
                    &[
                        ("x-ms-blob-type", BLOCK_BLOB),
                        ("x-ms-date", date.as_str()),
                        ("x-ms-version", STORAGE_API_VERSION),
                    ],
                    &shared_key::canonical_resource(account_name, &url),
                );
                let auth = shared_key::authorization(account_name, key, &sts)?;
                self.http.put(request_url).header(header::AUTHORIZATION, auth)
            }
            StorageCredential::Sas(token) => {
                request_url.set_query(Some(token));
                self.http.put(request_url)
            }
        };

        request = request
            .header("x-ms-blob-type", BLOCK_BLOB)
            .header("x-ms-date", &date)
            .header("x-ms-version", STORAGE_API_VERSION)
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(content);

        debug!(target: "services::blob", url = %url, "PUT blob");
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(240).collect();
            error!(
                target: "services::blob",
                %status,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "blob upload rejected"
            );
            return Err(BlobStorageError::HttpStatus {
                status: status.as_u16(),
                snippet,
            });
        }

        let etag = resp
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        info!(
            target: "services::blob",
            size,
            latency_ms = started.elapsed().as_millis(),
            "blob uploaded"
        );

        Ok(UploadedBlob {
            container: container.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            etag,
            size,
        })
    }
}
