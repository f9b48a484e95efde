use serde_json::{Map, Value};

use super::error::SpeechError;

/// Request body after type checks, before any allow-list or length checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub content: String,
    pub is_markup: bool,
    pub voice_id: String,
    pub format: String,
}

/// Extract the synthesis fields from a raw JSON body.
///
/// `content` comes from either `text` or `ssml`. `isMarkup` (or its legacy
/// alias `useSsml`) defaults to whether `ssml` was the field used.
pub fn parse_request(body: &[u8]) -> Result<ParsedRequest, SpeechError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| SpeechError::MalformedRequest(format!("body is not valid JSON: {}", e)))?;

    let fields = value
        .as_object()
        .ok_or_else(|| SpeechError::MalformedRequest("body must be a JSON object".to_string()))?;

    let text = optional_string(fields, "text")?;
    let ssml = optional_string(fields, "ssml")?;

    let (content, from_ssml) = match (text, ssml) {
        (Some(_), Some(_)) => {
            return Err(SpeechError::MalformedRequest(
                "provide either 'text' or 'ssml', not both".to_string(),
            ))
        }
        (Some(text), None) => (text, false),
        (None, Some(ssml)) => (ssml, true),
        (None, None) => {
            return Err(SpeechError::MalformedRequest(
                "field 'text' (or 'ssml') is required".to_string(),
            ))
        }
    };

    let voice_id = required_string(fields, "voiceId")?;
    let format = required_string(fields, "format")?;

    let is_markup = match optional_bool(fields, "isMarkup")? {
        Some(flag) => flag,
        None => optional_bool(fields, "useSsml")?.unwrap_or(from_ssml),
    };

    Ok(ParsedRequest {
        content,
        is_markup,
        voice_id,
        format,
    })
}

fn optional_string(fields: &Map<String, Value>, name: &str) -> Result<Option<String>, SpeechError> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(SpeechError::MalformedRequest(format!(
            "field '{}' must be a string",
            name
        ))),
    }
}

fn required_string(fields: &Map<String, Value>, name: &str) -> Result<String, SpeechError> {
    optional_string(fields, name)?
        .ok_or_else(|| SpeechError::MalformedRequest(format!("field '{}' is required", name)))
}

fn optional_bool(fields: &Map<String, Value>, name: &str) -> Result<Option<bool>, SpeechError> {
    match fields.get(name) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(_) => Err(SpeechError::MalformedRequest(format!(
            "field '{}' must be a boolean",
            name
        ))),
    }
}
