//! Photo upload policy (object keys, limits, public URLs).
//!
//! Both the API (presigning) and the client (upload flow) use these rules,
//! so the object key a client asks to sign is the key the public URL points at.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default maximum number of photos per item.
pub const DEFAULT_MAX_PHOTOS: usize = 4;

/// Lifetime of a presigned PUT URL (5 minutes).
pub const PRESIGN_EXPIRY_SECS: u64 = 5 * 60;

/// Bucket used when `OBJECT_STORE_BUCKET` is not set.
pub const DEFAULT_BUCKET: &str = "home-inventory";

/// Object-store port used when `OBJECT_STORE_PORT` is not set.
pub const DEFAULT_PORT: u16 = 9000;

/// Region buckets are created in.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Prefix of every item photo key.
pub const ITEM_KEY_PREFIX: &str = "items";

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

/// Reasons an upload is refused before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Please upload an image file")]
    NotAnImage,

    #[error("Maximum {max} photos allowed")]
    LimitReached { max: usize },
}

/// Limits applied to a single upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_photos: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_photos: DEFAULT_MAX_PHOTOS,
        }
    }
}

impl UploadPolicy {
    /// Check the MIME type first, then the photo count.
    pub fn check(&self, content_type: &str, current_photos: usize) -> Result<(), UploadRejection> {
        if !is_image(content_type) {
            return Err(UploadRejection::NotAnImage);
        }
        if current_photos >= self.max_photos {
            return Err(UploadRejection::LimitReached {
                max: self.max_photos,
            });
        }
        Ok(())
    }

    /// Whether another photo may be added at all.
    pub fn has_room(&self, current_photos: usize) -> bool {
        current_photos < self.max_photos
    }

    /// Counter text, e.g. `"2/4 photos"`.
    pub fn counter(&self, current_photos: usize) -> String {
        format!("{current_photos}/{} photos", self.max_photos)
    }
}

/// `image/*` check on a MIME type, ignoring case and parameters.
pub fn is_image(content_type: &str) -> bool {
    content_type
        .trim()
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Object key for an item photo: `items/<itemId>/<timestampMillis>-<fileName>`.
pub fn object_key(item_id: DbId, timestamp_millis: i64, file_name: &str) -> String {
    format!("{ITEM_KEY_PREFIX}/{item_id}/{timestamp_millis}-{file_name}")
}

// ---------------------------------------------------------------------------
// Endpoint / public URL
// ---------------------------------------------------------------------------

/// Where the object store is reachable from browsers and clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStoreEndpoint {
    pub host: String,
    pub port: u16,
    pub use_ssl: bool,
}

impl ObjectStoreEndpoint {
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    /// Base URL without a trailing slash, e.g. `http://minio.local:9000`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme(), self.host, self.port)
    }

    /// Public URL of an object. Deterministic for a given endpoint, bucket and key.
    ///
    /// Each `/`-separated segment of the key is percent-encoded, so a file name
    /// holding `#`, `?`, `%` or spaces still addresses the stored object.
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        let path = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}/{path}", self.base_url(), urlencoding::encode(bucket))
    }
}

/// Bucket policy granting anonymous `s3:GetObject` on every object.
pub fn public_read_policy(bucket: &str) -> serde_json::Value {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Principal": { "AWS": ["*"] },
                "Action": ["s3:GetObject"],
                "Resource": [format!("arn:aws:s3:::{bucket}/*")],
            }
        ],
    })
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    pub file_name: String,
    pub content_type: String,
}

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    pub presigned_url: String,
}
