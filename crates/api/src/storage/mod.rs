//! Object storage for item photos.
//!
//! The service never proxies photo bytes: it makes sure the bucket exists and
//! hands out presigned PUT URLs. Clients upload directly to the store.

pub mod s3;

use async_trait::async_trait;

pub use s3::S3ObjectStore;

/// Errors surfaced by an [`ObjectStore`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The store rejected or failed a request.
    #[error("object store request failed: {0}")]
    Request(String),

    /// A presigned URL could not be produced.
    #[error("failed to presign request: {0}")]
    Presign(String),
}

/// Operations the API needs from the S3-compatible store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket holding item photos.
    fn bucket(&self) -> &str;

    /// Create the bucket with a public-read policy if it does not exist yet.
    ///
    /// Idempotent: an existing bucket is left untouched.
    async fn ensure_bucket(&self) -> Result<(), StorageError>;

    /// Presigned PUT URL for `key`, bound to `content_type`, valid for
    /// [`PRESIGN_EXPIRY_SECS`](homeinv_core::upload::PRESIGN_EXPIRY_SECS).
    async fn presign_put(&self, key: &str, content_type: &str) -> Result<String, StorageError>;
}
