use std::collections::HashSet;
use std::time::Duration;

use super::error::SpeechError;
use super::markup::parse_markup;
use super::model::{OutputFormat, SynthesisRequest};
use super::request::ParsedRequest;
use crate::infrastructure::config::Config;

/// Limits and allow-lists the validator checks requests against.
/// Loaded once from configuration; never mutated while serving.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub allowed_voices: HashSet<String>,
    pub max_content_length: usize,
    pub max_pause: Duration,
}

impl ValidationRules {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_voices: config.allowed_voices.iter().cloned().collect(),
            max_content_length: config.max_chars,
            max_pause: config.max_pause(),
        }
    }
}

/// Unicode `Cf` (format) characters: invisible marks such as zero-width
/// spaces, bidi overrides and the byte order mark.
const FORMAT_CHARACTERS: [(char, char); 21] = [
    ('\u{00AD}', '\u{00AD}'),
    ('\u{0600}', '\u{0605}'),
    ('\u{061C}', '\u{061C}'),
    ('\u{06DD}', '\u{06DD}'),
    ('\u{070F}', '\u{070F}'),
    ('\u{0890}', '\u{0891}'),
    ('\u{08E2}', '\u{08E2}'),
    ('\u{180E}', '\u{180E}'),
    ('\u{200B}', '\u{200F}'),
    ('\u{202A}', '\u{202E}'),
    ('\u{2060}', '\u{2064}'),
    ('\u{2066}', '\u{206F}'),
    ('\u{FEFF}', '\u{FEFF}'),
    ('\u{FFF9}', '\u{FFFB}'),
    ('\u{110BD}', '\u{110BD}'),
    ('\u{110CD}', '\u{110CD}'),
    ('\u{13430}', '\u{1343F}'),
    ('\u{1BCA0}', '\u{1BCA3}'),
    ('\u{1D173}', '\u{1D17A}'),
    ('\u{E0001}', '\u{E0001}'),
    ('\u{E0020}', '\u{E007F}'),
];

/// Characters that never reach the engine: `Cc` controls other than
/// newline and tab, and `Cf` format characters.
pub fn is_stripped_character(c: char) -> bool {
    if c == '\n' || c == '\t' {
        return false;
    }
    c.is_control()
        || FORMAT_CHARACTERS
            .iter()
            .any(|(start, end)| (*start..=*end).contains(&c))
}

/// Drop control and format characters (keeping newline and tab) and trim the ends.
///
/// Running it on its own output changes nothing.
pub fn sanitize_content(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| !is_stripped_character(*c)).collect();
    cleaned.trim().to_string()
}

pub struct SpeechValidator {
    rules: ValidationRules,
}

impl SpeechValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Turn a parsed request into one that is safe to synthesize.
    ///
    /// Checks run in a fixed order: content, length, voice, format, markup.
    pub fn validate(&self, parsed: ParsedRequest) -> Result<SynthesisRequest, SpeechError> {
        let content = sanitize_content(&parsed.content);
        if content.is_empty() {
            return Err(SpeechError::InvalidContent(
                "content is empty after removing control characters and whitespace".to_string(),
            ));
        }

        let length = content.chars().count();
        if length > self.rules.max_content_length {
            return Err(SpeechError::ContentTooLong {
                limit: self.rules.max_content_length,
                actual: length,
            });
        }

        if !self.rules.allowed_voices.contains(&parsed.voice_id) {
            return Err(SpeechError::UnsupportedVoice {
                voice_id: parsed.voice_id,
            });
        }

        let output_format = OutputFormat::parse(&parsed.format).ok_or(
            SpeechError::UnsupportedFormat {
                format: parsed.format,
            },
        )?;

        if parsed.is_markup {
            let nodes = parse_markup(&content, self.rules.max_pause)
                .map_err(|e| SpeechError::UnsafeMarkup(e.to_string()))?;
            tracing::debug!(node_count = nodes.len(), "Markup accepted");
        }

        Ok(SynthesisRequest {
            content,
            is_markup: parsed.is_markup,
            voice_id: parsed.voice_id,
            output_format,
        })
    }
}
