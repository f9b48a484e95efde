use super::audio_store::{AudioStore, StorageError};
use async_trait::async_trait;
use aws_sdk_s3::{
    error::DisplayErrorContext, presigning::PresigningConfig, primitives::ByteStream,
    Client as S3Client,
};
use std::sync::Arc;
use std::time::Duration;

/// S3 implementation of the audio store
pub struct S3AudioStore {
    s3_client: Arc<S3Client>,
    bucket: String,
}

impl S3AudioStore {
    pub fn new(s3_client: Arc<S3Client>, bucket: String) -> Self {
        Self { s3_client, bucket }
    }
}

#[async_trait]
impl AudioStore for S3AudioStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size = bytes.len();

        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %detail,
                    bucket = %self.bucket,
                    key = key,
                    "S3 put_object failed"
                );
                StorageError(format!("S3 put_object failed: {}", detail))
            })?;

        tracing::info!(bucket = %self.bucket, key = key, size_bytes = size, "Audio object stored");
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| StorageError(format!("invalid presign expiry: {}", e)))?;

        let request = self
            .s3_client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                let detail = DisplayErrorContext(&e).to_string();
                tracing::error!(
                    error = %detail,
                    bucket = %self.bucket,
                    key = key,
                    "S3 presign get_object failed"
                );
                StorageError(format!("S3 presign failed: {}", detail))
            })?;

        Ok(request.uri().to_string())
    }
}
