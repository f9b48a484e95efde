use crate::domain::speech::{OutputFormat, SynthesisRequest, TextType};
use async_trait::async_trait;

/// Engine failures, already classified by who is at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine looked at the input and refused it
    #[error("{0}")]
    Rejected(String),
    /// Unreachable, timed out, or failed on its side
    #[error("{0}")]
    Unavailable(String),
    /// Throttled or over quota
    #[error("{0}")]
    QuotaExceeded(String),
}

/// Everything the engine needs for a single synthesis call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisParams<'a> {
    pub text: &'a str,
    pub text_type: TextType,
    pub voice_id: &'a str,
    pub output_format: OutputFormat,
}

impl<'a> SynthesisParams<'a> {
    pub fn from_request(request: &'a SynthesisRequest) -> Self {
        Self {
            text: &request.content,
            text_type: TextType::from_markup_flag(request.is_markup),
            voice_id: &request.voice_id,
            output_format: request.output_format,
        }
    }
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying engine (AWS Polly in production, fakes in tests).
///
/// Implementations make exactly one engine call per invocation and never retry.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize validated content and return the encoded audio
    ///
    /// # Errors
    /// Returns a classified [`EngineError`] if the engine fails or refuses the input
    async fn synthesize(&self, params: &SynthesisParams<'_>) -> Result<Vec<u8>, EngineError>;
}
