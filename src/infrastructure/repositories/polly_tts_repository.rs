use super::tts_repository::{EngineError, SynthesisParams, TtsRepository};
use crate::domain::speech::{OutputFormat, TextType};
use async_trait::async_trait;
use aws_sdk_polly::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    types::{Engine, OutputFormat as PollyOutputFormat, TextType as PollyTextType, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Error codes Polly (and the AWS front door) use for throttling
const QUOTA_ERROR_CODES: [&str; 6] = [
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "LimitExceededException",
    "ServiceQuotaExceededException",
    "RequestLimitExceeded",
];

/// 4xx codes that point at our credentials or setup rather than the caller's input
const ACCESS_ERROR_CODES: [&str; 5] = [
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "ExpiredTokenException",
    "MissingAuthenticationTokenException",
];

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    engine: Engine,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, engine: &str) -> Self {
        Self {
            polly_client,
            engine: Engine::from(engine),
        }
    }

    fn polly_output_format(format: OutputFormat) -> PollyOutputFormat {
        match format {
            OutputFormat::Mp3 => PollyOutputFormat::Mp3,
            OutputFormat::OggVorbis => PollyOutputFormat::OggVorbis,
            OutputFormat::Pcm => PollyOutputFormat::Pcm,
        }
    }

    fn polly_text_type(text_type: TextType) -> PollyTextType {
        match text_type {
            TextType::Text => PollyTextType::Text,
            TextType::Ssml => PollyTextType::Ssml,
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, params: &SynthesisParams<'_>) -> Result<Vec<u8>, EngineError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = params.voice_id,
            engine = ?self.engine,
            output_format = %params.output_format,
            text_type = ?params.text_type,
            text_length = params.text.chars().count(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(params.text)
            .text_type(Self::polly_text_type(params.text_type))
            .voice_id(VoiceId::from(params.voice_id))
            .output_format(Self::polly_output_format(params.output_format))
            .engine(self.engine.clone())
            .send()
            .await
            .map_err(|err| {
                let status = err.raw_response().map(|raw| raw.status().as_u16());
                let transport_failure =
                    matches!(err, SdkError::TimeoutError(_) | SdkError::DispatchFailure(_));
                let detail = DisplayErrorContext(&err).to_string();

                tracing::error!(
                    error = %detail,
                    error_code = ?err.code(),
                    http_status = ?status,
                    voice_id = params.voice_id,
                    "AWS Polly synthesize_speech failed"
                );

                if transport_failure {
                    EngineError::Unavailable(format!("AWS Polly unreachable: {}", detail))
                } else {
                    classify_failure(err.code(), status, detail)
                }
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            EngineError::Unavailable(format!("failed to read audio stream: {}", e))
        })?;
        let audio_bytes = audio_stream.into_bytes().to_vec();

        tracing::info!(
            provider = "polly",
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = params.text.chars().count(),
            audio_size_bytes = audio_bytes.len(),
            "TTS synthesis completed"
        );

        Ok(audio_bytes)
    }
}

/// Classify a failed Polly response by its error code and HTTP status.
///
/// Throttling wins over everything else, then server faults, then client
/// faults. Anything without a usable signal counts as unavailability.
pub(crate) fn classify_failure(code: Option<&str>, status: Option<u16>, detail: String) -> EngineError {
    if code.is_some_and(|c| QUOTA_ERROR_CODES.contains(&c)) || status == Some(429) {
        return EngineError::QuotaExceeded(detail);
    }
    if code.is_some_and(|c| c == "ServiceFailureException" || ACCESS_ERROR_CODES.contains(&c)) {
        return EngineError::Unavailable(detail);
    }
    match status {
        Some(s) if s >= 500 => EngineError::Unavailable(detail),
        Some(s) if (400..500).contains(&s) => EngineError::Rejected(detail),
        _ => EngineError::Unavailable(detail),
    }
}
