//! Blob storage access for uploaded regulatory documents.
//!
//! Parses an account connection string, signs requests with the account key
//! (or appends a SAS token) and writes whole files as block blobs.

pub mod blob_storage;
pub mod connection_string;
pub mod errors;
mod shared_key;

pub use blob_storage::{BlobStorageClient, UploadedBlob};
pub use connection_string::{StorageAccount, StorageCredential};
pub use errors::BlobStorageError;
