//! Shared Key request signing for the blob service.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;

use crate::errors::BlobStorageError;

type HmacSha256 = Hmac<Sha256>;

/// `x-ms-version` sent with every request.
pub(crate) const STORAGE_API_VERSION: &str = "2021-08-06";

/// Current time in the RFC 1123 form the service expects in `x-ms-date`.
pub(crate) fn rfc1123_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `/{account}{encoded path}`. Query parameters are not signed; the
/// requests issued here carry none.
pub(crate) fn canonical_resource(account: &str, url: &Url) -> String {
    format!("/{account}{}", url.path())
}

/// Builds the Shared Key string-to-sign.
///
/// `ms_headers` are the `x-ms-*` headers; they are lower-cased and sorted
/// here. `Date` stays empty because `x-ms-date` is always sent, and a zero
/// content length is written as an empty line.
pub(crate) fn string_to_sign(
    verb: &str,
    content_length: usize,
    content_type: &str,
    ms_headers: &[(&str, &str)],
    canonical_resource: &str,
) -> String {
    let length = if content_length == 0 {
        String::new()
    } else {
        content_length.to_string()
    };

    let mut headers: Vec<(String, &str)> = ms_headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim()))
        .collect();
    headers.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::with_capacity(256);
    out.push_str(verb);
    out.push('\n');
    // Content-Encoding, Content-Language
    out.push_str("\n\n");
    out.push_str(&length);
    out.push('\n');
    // Content-MD5
    out.push('\n');
    out.push_str(content_type);
    out.push('\n');
    // Date, If-Modified-Since, If-Match, If-None-Match, If-Unmodified-Since, Range
    out.push_str("\n\n\n\n\n\n");
    for (name, value) in headers {
        out.push_str(&name);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    out.push_str(canonical_resource);
    out
}

/// `SharedKey {account}:{base64(hmac_sha256(key, string_to_sign))}`.
pub(crate) fn authorization(
    account: &str,
    key: &[u8],
    string_to_sign: &str,
) -> Result<String, BlobStorageError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| BlobStorageError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());
    Ok(format!("SharedKey {account}:{signature}"))
}
