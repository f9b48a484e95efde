use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audio encodings the gateway can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Mp3,
    OggVorbis,
    Pcm,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Mp3, OutputFormat::OggVorbis, OutputFormat::Pcm];

    /// Match a caller-supplied format name. Surrounding whitespace and case are ignored.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|format| format.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg_vorbis",
            OutputFormat::Pcm => "pcm",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "audio/mpeg",
            OutputFormat::OggVorbis => "audio/ogg",
            OutputFormat::Pcm => "audio/wave",
        }
    }

    /// File extension used for stored objects
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::OggVorbis => "ogg",
            OutputFormat::Pcm => "pcm",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the engine should interpret the content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Text,
    Ssml,
}

impl TextType {
    pub fn from_markup_flag(is_markup: bool) -> Self {
        if is_markup {
            TextType::Ssml
        } else {
            TextType::Text
        }
    }
}

/// A request that passed every input check and is safe to send to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub content: String,
    pub is_markup: bool,
    pub voice_id: String,
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct SynthesisResult {
    pub audio_bytes: Vec<u8>,
    pub content_type: &'static str,
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub object_key: String,
    pub access_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Progress of a single request through the pipeline. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Received,
    Parsed,
    Validated,
    Synthesized,
    Stored,
    Completed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::Parsed => "parsed",
            PipelineStage::Validated => "validated",
            PipelineStage::Synthesized => "synthesized",
            PipelineStage::Stored => "stored",
            PipelineStage::Completed => "completed",
        };
        write!(f, "{}", name)
    }
}
