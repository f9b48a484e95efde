use async_trait::async_trait;
use parking_lot::Mutex;
use speech_gateway::domain::speech::{OutputFormat, TextType};
use speech_gateway::infrastructure::repositories::{
    AudioStore, EngineError, StorageError, SynthesisParams, TtsRepository,
};
use std::time::Duration;

pub const FAKE_BUCKET_URL: &str = "https://speech-audio.s3.eu-west-1.amazonaws.com";

/// What the fake engine was asked to synthesize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSynthesis {
    pub text: String,
    pub text_type: TextType,
    pub voice_id: String,
    pub output_format: OutputFormat,
}

pub struct FakeTtsRepository {
    outcome: Result<Vec<u8>, EngineError>,
    calls: Mutex<Vec<RecordedSynthesis>>,
}

impl Default for FakeTtsRepository {
    fn default() -> Self {
        Self {
            outcome: Ok(mock_audio_bytes()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[allow(dead_code)]
impl FakeTtsRepository {
    pub fn failing(error: EngineError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn calls(&self) -> Vec<RecordedSynthesis> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn synthesize(&self, params: &SynthesisParams<'_>) -> Result<Vec<u8>, EngineError> {
        self.calls.lock().push(RecordedSynthesis {
            text: params.text.to_string(),
            text_type: params.text_type,
            voice_id: params.voice_id.to_string(),
            output_format: params.output_format,
        });
        self.outcome.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    pub key: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Default)]
pub struct FakeAudioStore {
    objects: Mutex<Vec<StoredAudio>>,
    fail_put: bool,
    fail_presign: bool,
}

#[allow(dead_code)]
impl FakeAudioStore {
    pub fn failing_put() -> Self {
        Self {
            fail_put: true,
            ..Default::default()
        }
    }

    pub fn failing_presign() -> Self {
        Self {
            fail_presign: true,
            ..Default::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredAudio> {
        self.objects.lock().clone()
    }
}

#[async_trait]
impl AudioStore for FakeAudioStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_put {
            return Err(StorageError("AccessDenied: bucket policy".to_string()));
        }
        self.objects.lock().push(StoredAudio {
            key: key.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StorageError> {
        if self.fail_presign {
            return Err(StorageError("credentials expired".to_string()));
        }
        Ok(format!(
            "{}/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            FAKE_BUCKET_URL,
            key,
            ttl.as_secs()
        ))
    }
}

pub fn mock_audio_bytes() -> Vec<u8> {
    // Minimal valid MP3 file (silence)
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, 0x00, // Some padding
    ]
}
