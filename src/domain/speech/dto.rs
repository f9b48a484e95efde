use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::OutputFormat;
use super::service::SpeechOutcome;

/// Response for POST /api/speech
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub url: String,
    pub expires_at: DateTime<Utc>,
    pub key: String,
    pub voice_id: String,
    pub format: OutputFormat,
    pub content_type: String,
    pub is_markup: bool,
}

impl From<SpeechOutcome> for SpeechResponse {
    fn from(outcome: SpeechOutcome) -> Self {
        Self {
            url: outcome.stored.access_url,
            expires_at: outcome.stored.expires_at,
            key: outcome.stored.object_key,
            voice_id: outcome.voice_id,
            format: outcome.output_format,
            content_type: outcome.output_format.content_type().to_string(),
            is_markup: outcome.is_markup,
        }
    }
}
