use crate::infrastructure::repositories::EngineError;

/// Every way a speech request can fail. Each variant maps to exactly one
/// externally visible `errorKind`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("invalid content: {0}")]
    InvalidContent(String),

    #[error("content is {actual} characters long, limit is {limit}")]
    ContentTooLong { limit: usize, actual: usize },

    #[error("voiceId '{voice_id}' is not an allowed voice")]
    UnsupportedVoice { voice_id: String },

    #[error("format '{format}' must be one of: mp3, ogg_vorbis, pcm")]
    UnsupportedFormat { format: String },

    #[error("unsafe markup: {0}")]
    UnsafeMarkup(String),

    #[error("speech engine rejected the input: {0}")]
    EngineRejectedInput(String),

    #[error("speech engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("speech engine quota exceeded: {0}")]
    EngineQuotaExceeded(String),

    #[error("failed to store audio: {0}")]
    StorageWriteFailed(String),

    #[error("failed to issue access url: {0}")]
    StorageUrlFailed(String),
}

impl SpeechError {
    /// Stable name reported to callers as `errorKind`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRequest(_) => "MalformedRequest",
            Self::InvalidContent(_) => "InvalidContent",
            Self::ContentTooLong { .. } => "ContentTooLong",
            Self::UnsupportedVoice { .. } => "UnsupportedVoice",
            Self::UnsupportedFormat { .. } => "UnsupportedFormat",
            Self::UnsafeMarkup(_) => "UnsafeMarkup",
            Self::EngineRejectedInput(_) => "EngineRejectedInput",
            Self::EngineUnavailable(_) => "EngineUnavailable",
            Self::EngineQuotaExceeded(_) => "EngineQuotaExceeded",
            Self::StorageWriteFailed(_) => "StorageWriteFailed",
            Self::StorageUrlFailed(_) => "StorageUrlFailed",
        }
    }

    /// Client errors need a corrected request; everything else is a
    /// system fault the caller may retry.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::MalformedRequest(_)
            | Self::InvalidContent(_)
            | Self::ContentTooLong { .. }
            | Self::UnsupportedVoice { .. }
            | Self::UnsupportedFormat { .. }
            | Self::UnsafeMarkup(_)
            | Self::EngineRejectedInput(_) => true,
            Self::EngineUnavailable(_)
            | Self::EngineQuotaExceeded(_)
            | Self::StorageWriteFailed(_)
            | Self::StorageUrlFailed(_) => false,
        }
    }
}

impl From<EngineError> for SpeechError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rejected(msg) => SpeechError::EngineRejectedInput(msg),
            EngineError::Unavailable(msg) => SpeechError::EngineUnavailable(msg),
            EngineError::QuotaExceeded(msg) => SpeechError::EngineQuotaExceeded(msg),
        }
    }
}
