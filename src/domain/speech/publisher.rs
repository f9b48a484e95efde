use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::error::SpeechError;
use super::model::{OutputFormat, StoredObject, SynthesisResult};
use crate::infrastructure::repositories::AudioStore;

/// Build a fresh object key. Each call draws its own random token,
/// so concurrent requests never need to coordinate.
pub fn generate_object_key(format: OutputFormat) -> String {
    format!("audio/{}.{}", Uuid::new_v4(), format.extension())
}

pub struct AudioPublisher {
    store: Arc<dyn AudioStore>,
    url_ttl: Duration,
}

impl AudioPublisher {
    pub fn new(store: Arc<dyn AudioStore>, url_ttl: Duration) -> Self {
        Self { store, url_ttl }
    }

    /// Store the audio and hand back a signed URL for it.
    ///
    /// If signing fails after a successful write the object is left in place;
    /// the bucket lifecycle rule removes it.
    pub async fn publish(&self, result: SynthesisResult) -> Result<StoredObject, SpeechError> {
        let object_key = generate_object_key(result.output_format);

        self.store
            .put_object(&object_key, result.audio_bytes, result.content_type)
            .await
            .map_err(|e| SpeechError::StorageWriteFailed(e.to_string()))?;

        let issued_at = Utc::now();
        let access_url = self
            .store
            .presign_get(&object_key, self.url_ttl)
            .await
            .map_err(|e| {
                tracing::warn!(
                    object_key = %object_key,
                    "Audio stored but no URL issued; object left for lifecycle expiry"
                );
                SpeechError::StorageUrlFailed(e.to_string())
            })?;

        Ok(StoredObject {
            object_key,
            access_url,
            expires_at: issued_at + chrono::Duration::seconds(self.url_ttl.as_secs() as i64),
        })
    }
}
