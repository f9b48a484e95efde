use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(pub String);

/// Blob storage for synthesized audio.
///
/// Objects expire on the store's own lifecycle policy; nothing here deletes them.
#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Write `bytes` under `key` in a single put
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Issue a time-limited GET URL for an existing object
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
}
