//! Storage account connection strings.
//!
//! Accepts the `Key=Value;Key=Value` form issued by the portal, a SAS-only
//! string with an explicit `BlobEndpoint`, and `UseDevelopmentStorage=true`
//! for the local emulator. Keys are matched case-insensitively.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Url;

use crate::errors::BlobStorageError;

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// How requests to the account are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum StorageCredential {
    /// Shared Key signing with the decoded account key.
    SharedKey { account_name: String, key: Vec<u8> },
    /// Pre-signed SAS query string, without the leading `?`.
    Sas(String),
}

impl fmt::Debug for StorageCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SharedKey { account_name, .. } => f
                .debug_struct("SharedKey")
                .field("account_name", account_name)
                .field("key", &"<redacted>")
                .finish(),
            Self::Sas(_) => f.debug_tuple("Sas").field(&"<redacted>").finish(),
        }
    }
}

/// Resolved account: where the blob service lives and how to authenticate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageAccount {
    pub blob_endpoint: Url,
    pub credential: StorageCredential,
}

impl StorageAccount {
    /// Parses a connection string.
    ///
    /// # Errors
    /// - [`BlobStorageError::MalformedSegment`] for a segment without `=`
    /// - [`BlobStorageError::MissingSetting`] when the endpoint cannot be derived
    /// - [`BlobStorageError::MissingCredential`] without `AccountKey` or `SharedAccessSignature`
    /// - [`BlobStorageError::InvalidAccountKey`] / [`BlobStorageError::InvalidEndpoint`] on bad values
    pub fn from_connection_string(raw: &str) -> Result<Self, BlobStorageError> {
        let settings = Settings::parse(raw)?;

        if settings
            .get("UseDevelopmentStorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Self::development();
        }

        let account_name = settings.get("AccountName");

        let blob_endpoint = match settings.get("BlobEndpoint") {
            Some(endpoint) => parse_endpoint(endpoint)?,
            None => {
                let name = account_name.ok_or(BlobStorageError::MissingSetting("AccountName"))?;
                let protocol = settings.get("DefaultEndpointsProtocol").unwrap_or(DEFAULT_PROTOCOL);
                let suffix = settings.get("EndpointSuffix").unwrap_or(DEFAULT_ENDPOINT_SUFFIX);
                parse_endpoint(&format!("{protocol}://{name}.blob.{suffix}"))?
            }
        };

        let credential = if let Some(key) = settings.get("AccountKey") {
            let account_name = account_name
                .ok_or(BlobStorageError::MissingSetting("AccountName"))?
                .to_string();
            StorageCredential::SharedKey {
                account_name,
                key: decode_key(key)?,
            }
        } else if let Some(sas) = settings.get("SharedAccessSignature") {
            StorageCredential::Sas(sas.trim_start_matches('?').to_string())
        } else {
            return Err(BlobStorageError::MissingCredential);
        };

        Ok(Self {
            blob_endpoint,
            credential,
        })
    }

    /// Well-known local emulator account.
    pub fn development() -> Result<Self, BlobStorageError> {
        Ok(Self {
            blob_endpoint: parse_endpoint(DEV_BLOB_ENDPOINT)?,
            credential: StorageCredential::SharedKey {
                account_name: DEV_ACCOUNT_NAME.to_string(),
                key: decode_key(DEV_ACCOUNT_KEY)?,
            },
        })
    }
}

struct Settings(Vec<(String, String)>);

impl Settings {
    fn parse(raw: &str) -> Result<Self, BlobStorageError> {
        let mut pairs = Vec::new();
        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            // Values may contain '=' (base64 padding, SAS params); split on the first one only.
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| BlobStorageError::MalformedSegment(segment.to_string()))?;
            pairs.push((key.trim().to_string(), value.trim().to_string()));
        }
        Ok(Self(pairs))
    }

    /// Last non-empty value for `name`.
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, v)| k.eq_ignore_ascii_case(name) && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

fn decode_key(key: &str) -> Result<Vec<u8>, BlobStorageError> {
    STANDARD
        .decode(key)
        .map_err(|e| BlobStorageError::InvalidAccountKey(e.to_string()))
}

fn parse_endpoint(raw: &str) -> Result<Url, BlobStorageError> {
    let invalid = |reason: String| BlobStorageError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(invalid("missing host".into())),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=";

    #[test]
    fn portal_connection_string() {
        let raw = format!(
            "DefaultEndpointsProtocol=https;AccountName=complianceacct;AccountKey={KEY};EndpointSuffix=core.windows.net"
        );
        let account = StorageAccount::from_connection_string(&raw).unwrap();

        assert_eq!(
            account.blob_endpoint.as_str(),
            "https://complianceacct.blob.core.windows.net/"
        );
        match account.credential {
            StorageCredential::SharedKey { account_name, key } => {
                assert_eq!(account_name, "complianceacct");
                assert_eq!(key, b"0123456789abcdef0123456789abcdef");
            }
            other => panic!("unexpected credential: {other:?}"),
        }
    }

    #[test]
    fn defaults_protocol_and_suffix() {
        let raw = format!("AccountName=acct;AccountKey={KEY}");
        let account = StorageAccount::from_connection_string(&raw).unwrap();
        assert_eq!(account.blob_endpoint.as_str(), "https://acct.blob.core.windows.net/");
    }

    #[test]
    fn blob_endpoint_overrides_derived_host() {
        let raw = format!("AccountName=acct;AccountKey={KEY};BlobEndpoint=http://localhost:10000/acct;");
        let account = StorageAccount::from_connection_string(&raw).unwrap();
        assert_eq!(account.blob_endpoint.as_str(), "http://localhost:10000/acct");
    }

    #[test]
    fn sas_only_connection_string() {
        let raw = "BlobEndpoint=https://acct.blob.core.windows.net;SharedAccessSignature=?sv=2022-11-02&ss=b&sig=abc%3D";
        let account = StorageAccount::from_connection_string(raw).unwrap();
        assert_eq!(
            account.credential,
            StorageCredential::Sas("sv=2022-11-02&ss=b&sig=abc%3D".into())
        );
    }

    #[test]
    fn development_storage_shortcut() {
        let account = StorageAccount::from_connection_string("UseDevelopmentStorage=true").unwrap();
        assert_eq!(account.blob_endpoint.as_str(), DEV_BLOB_ENDPOINT);
        assert!(matches!(
            account.credential,
            StorageCredential::SharedKey { ref account_name, .. } if account_name == DEV_ACCOUNT_NAME
        ));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let raw = format!("accountname=acct;ACCOUNTKEY={KEY}");
        assert!(StorageAccount::from_connection_string(&raw).is_ok());
    }

    #[test]
    fn rejects_incomplete_strings() {
        assert!(matches!(
            StorageAccount::from_connection_string("garbage"),
            Err(BlobStorageError::MalformedSegment(_))
        ));
        assert!(matches!(
            StorageAccount::from_connection_string("AccountName=acct"),
            Err(BlobStorageError::MissingCredential)
        ));
        assert!(matches!(
            StorageAccount::from_connection_string(&format!("AccountKey={KEY}")),
            Err(BlobStorageError::MissingSetting("AccountName"))
        ));
        assert!(matches!(
            StorageAccount::from_connection_string("AccountName=acct;AccountKey=not base64!"),
            Err(BlobStorageError::InvalidAccountKey(_))
        ));
        assert!(matches!(
            StorageAccount::from_connection_string(&format!(
                "AccountName=acct;AccountKey={KEY};BlobEndpoint=ftp://host"
            )),
            Err(BlobStorageError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn debug_redacts_secrets() {
        let raw = format!("AccountName=acct;AccountKey={KEY}");
        let account = StorageAccount::from_connection_string(&raw).unwrap();
        let dbg = format!("{account:?}");
        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("48, 49"));
    }
}
