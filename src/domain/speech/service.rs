use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::error::SpeechError;
use super::model::{OutputFormat, PipelineStage, StoredObject};
use super::publisher::AudioPublisher;
use super::request::parse_request;
use super::sanitizer::{SpeechValidator, ValidationRules};
use super::synthesizer::SpeechSynthesizer;
use crate::infrastructure::repositories::{AudioStore, TtsRepository};

/// What a completed request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechOutcome {
    pub stored: StoredObject,
    pub voice_id: String,
    pub output_format: OutputFormat,
    pub is_markup: bool,
}

pub struct SpeechService {
    validator: SpeechValidator,
    synthesizer: SpeechSynthesizer,
    publisher: AudioPublisher,
}

impl SpeechService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        audio_store: Arc<dyn AudioStore>,
        rules: ValidationRules,
        url_ttl: Duration,
    ) -> Self {
        Self {
            validator: SpeechValidator::new(rules),
            synthesizer: SpeechSynthesizer::new(tts_repo),
            publisher: AudioPublisher::new(audio_store, url_ttl),
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn a raw request body into stored audio and a signed URL
    ///
    /// This operation:
    /// - Parses and type-checks the body
    /// - Sanitizes and validates content, voice, format and markup
    /// - Calls the speech engine once (no retries)
    /// - Stores the audio and signs a URL for it
    ///
    /// Stops at the first failure; nothing after that stage runs.
    async fn synthesize(&self, body: &[u8]) -> Result<SpeechOutcome, SpeechError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, body: &[u8]) -> Result<SpeechOutcome, SpeechError> {
        let start_time = Instant::now();
        let mut stage = PipelineStage::Received;

        let result = self.run(body, &mut stage).await;

        match &result {
            Ok(outcome) => tracing::info!(
                object_key = %outcome.stored.object_key,
                voice_id = %outcome.voice_id,
                format = %outcome.output_format,
                is_markup = outcome.is_markup,
                latency_ms = start_time.elapsed().as_millis(),
                "Speech request completed"
            ),
            Err(err) if err.is_client_error() => tracing::warn!(
                failed_after = %stage,
                error_kind = err.kind(),
                error = %err,
                "Speech request rejected"
            ),
            Err(err) => tracing::error!(
                failed_after = %stage,
                error_kind = err.kind(),
                error = %err,
                latency_ms = start_time.elapsed().as_millis(),
                "Speech request failed"
            ),
        }

        result
    }
}

impl SpeechService {
    async fn run(&self, body: &[u8], stage: &mut PipelineStage) -> Result<SpeechOutcome, SpeechError> {
        let parsed = parse_request(body)?;
        advance(stage, PipelineStage::Parsed);

        let request = self.validator.validate(parsed)?;
        advance(stage, PipelineStage::Validated);
        tracing::info!(
            voice_id = %request.voice_id,
            format = %request.output_format,
            is_markup = request.is_markup,
            content_length = request.content.chars().count(),
            "Speech request validated"
        );

        let synthesized = self.synthesizer.synthesize(&request).await?;
        advance(stage, PipelineStage::Synthesized);

        let stored = self.publisher.publish(synthesized).await?;
        advance(stage, PipelineStage::Stored);

        let outcome = SpeechOutcome {
            stored,
            voice_id: request.voice_id,
            output_format: request.output_format,
            is_markup: request.is_markup,
        };
        advance(stage, PipelineStage::Completed);

        Ok(outcome)
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug_assert!(next > *stage, "pipeline stages only move forward");
    tracing::debug!(from = %stage, to = %next, "Pipeline stage advanced");
    *stage = next;
}
