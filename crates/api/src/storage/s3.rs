//! [`ObjectStore`] backed by aws-sdk-s3, pointed at a MinIO-style endpoint.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use homeinv_core::upload::{public_read_policy, DEFAULT_REGION, PRESIGN_EXPIRY_SECS};
use tracing::{debug, info};

use super::{ObjectStore, StorageError};
use crate::config::ObjectStoreConfig;

pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    /// Build a client with static credentials and path-style addressing.
    pub fn new(config: &ObjectStoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "homeinv-config",
        );

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint.base_url())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!(
            endpoint = %config.endpoint.base_url(),
            bucket = %config.bucket,
            "Object store client initialized"
        );

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
        }
    }

    async fn bucket_exists(&self) -> Result<bool, StorageError> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found())
                {
                    Ok(false)
                } else {
                    Err(StorageError::Request(
                        DisplayErrorContext(&err).to_string(),
                    ))
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn ensure_bucket(&self) -> Result<(), StorageError> {
        if self.bucket_exists().await? {
            debug!(bucket = %self.bucket, "Bucket already exists");
            return Ok(());
        }

        let mut request = self.client.create_bucket().bucket(&self.bucket);
        // us-east-1 is the implicit location and must not be sent explicitly.
        if self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }
        request
            .send()
            .await
            .map_err(|e| StorageError::Request(DisplayErrorContext(&e).to_string()))?;

        self.client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(public_read_policy(&self.bucket).to_string())
            .send()
            .await
            .map_err(|e| StorageError::Request(DisplayErrorContext(&e).to_string()))?;

        info!(bucket = %self.bucket, region = %self.region, "Created bucket with public-read policy");
        Ok(())
    }

    async fn presign_put(&self, key: &str, content_type: &str) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(PRESIGN_EXPIRY_SECS))
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(DisplayErrorContext(&e).to_string()))?;

        debug!(bucket = %self.bucket, key, "Presigned upload URL");
        Ok(request.uri().to_string())
    }
}
