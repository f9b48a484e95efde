use std::sync::Arc;

use super::error::SpeechError;
use super::model::{SynthesisRequest, SynthesisResult};
use crate::infrastructure::repositories::{SynthesisParams, TtsRepository};

/// Drives one engine call per request and classifies what comes back
pub struct SpeechSynthesizer {
    tts_repo: Arc<dyn TtsRepository>,
}

impl SpeechSynthesizer {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }

    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, SpeechError> {
        let params = SynthesisParams::from_request(request);

        let audio_bytes = self.tts_repo.synthesize(&params).await?;

        // An empty stream is a broken response, not a silent clip
        if audio_bytes.is_empty() {
            return Err(SpeechError::EngineUnavailable(
                "engine returned no audio".to_string(),
            ));
        }

        Ok(SynthesisResult {
            audio_bytes,
            content_type: request.output_format.content_type(),
            output_format: request.output_format,
        })
    }
}
