//! Photo upload flow for an item.
//!
//! One file at a time: validate locally, make sure the bucket exists, get a
//! presigned PUT URL from the service, PUT the bytes straight to the object
//! store, and hand back the public URL. Persisting that URL on the item is the
//! caller's next step ([`ItemList::attach_photo`](crate::views::ItemList::attach_photo)).

use homeinv_core::types::DbId;
use homeinv_core::upload::{object_key, ObjectStoreEndpoint, UploadPolicy, UploadRejection, UploadUrlRequest};

use crate::client::UploadTransport;
use crate::error::ClientError;
use crate::session::Session;

/// A file picked by the user.
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Refused before any request was sent.
    #[error(transparent)]
    Rejected(#[from] UploadRejection),

    /// Any failure of the bucket, presign or PUT step.
    #[error("Failed to upload photo")]
    Failed(#[source] ClientError),
}

/// Upload state machine for one item's photos.
#[derive(Debug)]
pub struct PhotoUploader {
    policy: UploadPolicy,
    endpoint: ObjectStoreEndpoint,
    bucket: String,
    state: UploadState,
    /// Message of the last failed attempt, cleared when a new one starts.
    pub error: Option<String>,
}

impl PhotoUploader {
    pub fn new(endpoint: ObjectStoreEndpoint, bucket: impl Into<String>) -> Self {
        Self::with_policy(endpoint, bucket, UploadPolicy::default())
    }

    pub fn with_policy(endpoint: ObjectStoreEndpoint, bucket: impl Into<String>, policy: UploadPolicy) -> Self {
        Self {
            policy,
            endpoint,
            bucket: bucket.into(),
            state: UploadState::Idle,
            error: None,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Whether the upload control should be enabled.
    pub fn can_upload(&self, current_photos: usize) -> bool {
        self.state == UploadState::Idle && self.policy.has_room(current_photos)
    }

    /// Counter text, e.g. `"2/4 photos"`.
    pub fn counter(&self, current_photos: usize) -> String {
        self.policy.counter(current_photos)
    }

    /// Upload `file` for `item_id` and return its public URL.
    ///
    /// Non-image files and a full photo list are rejected without any
    /// request. Whatever happens, the uploader is back in `Idle` afterwards.
    pub async fn upload<T: UploadTransport + ?Sized>(
        &mut self,
        transport: &T,
        session: &Session,
        item_id: DbId,
        file: PhotoFile,
        current_photos: usize,
    ) -> Result<String, UploadError> {
        self.error = None;
        if let Err(rejection) = self.policy.check(&file.content_type, current_photos) {
            self.error = Some(rejection.to_string());
            return Err(rejection.into());
        }

        let key = object_key(item_id, chrono::Utc::now().timestamp_millis(), &file.file_name);
        let result = {
            let _in_flight = InFlight::enter(&mut self.state);
            transfer(transport, session, &key, file).await
        };

        match result {
            Ok(()) => {
                let url = self.endpoint.public_url(&self.bucket, &key);
                tracing::info!(item_id, key = %key, "Photo uploaded");
                Ok(url)
            }
            Err(err) => {
                tracing::warn!(item_id, key = %key, error = %err, "Photo upload failed");
                let err = UploadError::Failed(err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

}

/// Keeps the uploader in `Uploading` for its lifetime. Dropping it, also when
/// the upload future is cancelled mid-transfer, puts the state back to `Idle`.
struct InFlight<'a>(&'a mut UploadState);

impl<'a> InFlight<'a> {
    fn enter(state: &'a mut UploadState) -> Self {
        *state = UploadState::Uploading;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = UploadState::Idle;
    }
}

async fn transfer<T: UploadTransport + ?Sized>(
    transport: &T,
    session: &Session,
    key: &str,
    file: PhotoFile,
) -> Result<(), ClientError> {
    transport.ensure_bucket(session).await?;
    let presigned_url = transport
        .presign(
            session,
            &UploadUrlRequest {
                file_name: key.to_string(),
                content_type: file.content_type.clone(),
            },
        )
        .await?;
    transport
        .put_object(&presigned_url, &file.content_type, file.bytes)
        .await
}
