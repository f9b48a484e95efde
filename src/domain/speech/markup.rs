//! Default-deny SSML validation.
//!
//! Content is scanned into a closed set of nodes: text and pauses. A single
//! `<speak>` root and self-closing `<break/>` tags are the only elements let
//! through. Everything else (other tags, comments, CDATA, processing
//! instructions, unknown attributes) is rejected before it reaches the engine.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use super::sanitizer::is_stripped_character;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^<(/)?([A-Za-z_][\w:.-]*)((?:\s+[A-Za-z_:][\w:.-]*\s*=\s*(?:"[^"<>]*"|'[^'<>]*'))*)\s*(/)?>$"#,
    )
    .expect("tag pattern is valid")
});

static ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][\w:.-]*)\s*=\s*(?:"([^"<>]*)"|'([^'<>]*)')"#)
        .expect("attribute pattern is valid")
});

static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:amp|lt|gt|quot|apos|#([0-9]{1,7})|#x([0-9A-Fa-f]{1,6}));")
        .expect("reference pattern is valid")
});

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(?:\.[0-9]+)?)(ms|s)$").expect("duration pattern is valid")
});

const SPEAK_ATTRIBUTES: [&str; 3] = ["version", "xml:lang", "xmlns"];
const BREAK_ATTRIBUTES: [&str; 2] = ["time", "strength"];
const BREAK_STRENGTHS: [&str; 6] = ["none", "x-weak", "weak", "medium", "strong", "x-strong"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Text(String),
    Pause(Pause),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pause {
    pub time: Option<Duration>,
    pub strength: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("markup is not well-formed: {0}")]
    Malformed(String),

    #[error("tag <{0}> is not allowed")]
    DisallowedTag(String),

    #[error("comments, CDATA, doctype and processing instructions are not allowed")]
    DisallowedConstruct,

    #[error("attribute '{attribute}' is not allowed on <{tag}>")]
    DisallowedAttribute { tag: String, attribute: String },

    #[error("break time '{0}' is not a valid duration (use e.g. 400ms or 1.5s)")]
    InvalidDuration(String),

    #[error("break time '{value}' exceeds the maximum of {max_millis}ms")]
    PauseTooLong { value: String, max_millis: u128 },

    #[error("break strength '{0}' is not recognised")]
    InvalidStrength(String),

    #[error("character reference '{0}' does not name an allowed character")]
    InvalidCharacterReference(String),
}

/// Validate `input` as SSML and return its text and pause nodes in order
pub fn parse_markup(input: &str, max_pause: Duration) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut scanner = Scanner {
        max_pause,
        nodes: Vec::new(),
        root_seen: false,
        inside_root: false,
    };

    let mut rest = input;
    while let Some(start) = rest.find('<') {
        let (text, tail) = rest.split_at(start);
        scanner.text(text)?;

        let end = tail
            .find('>')
            .ok_or_else(|| MarkupError::Malformed("unterminated tag".to_string()))?;
        scanner.tag(&tail[..=end])?;
        rest = &tail[end + 1..];
    }
    scanner.text(rest)?;

    if !scanner.root_seen {
        return Err(MarkupError::Malformed(
            "missing <speak> root element".to_string(),
        ));
    }
    if scanner.inside_root {
        return Err(MarkupError::Malformed("<speak> is never closed".to_string()));
    }

    Ok(scanner.nodes)
}

struct Scanner {
    max_pause: Duration,
    nodes: Vec<MarkupNode>,
    root_seen: bool,
    inside_root: bool,
}

impl Scanner {
    fn text(&mut self, text: &str) -> Result<(), MarkupError> {
        if text.trim().is_empty() {
            if self.inside_root && !text.is_empty() {
                self.nodes.push(MarkupNode::Text(text.to_string()));
            }
            return Ok(());
        }

        if !self.inside_root {
            return Err(MarkupError::Malformed(
                "text outside the <speak> root element".to_string(),
            ));
        }

        if text.contains('>') {
            return Err(MarkupError::Malformed("unescaped '>' in text".to_string()));
        }
        check_references(text)?;

        self.nodes.push(MarkupNode::Text(text.to_string()));
        Ok(())
    }

    fn tag(&mut self, raw: &str) -> Result<(), MarkupError> {
        if raw.starts_with("<!") || raw.starts_with("<?") {
            return Err(MarkupError::DisallowedConstruct);
        }

        let captures = TAG_PATTERN
            .captures(raw)
            .ok_or_else(|| MarkupError::Malformed("invalid tag syntax".to_string()))?;

        let closing = captures.get(1).is_some();
        let name = &captures[2];
        let attributes = captures.get(3).map_or("", |m| m.as_str());
        let self_closing = captures.get(4).is_some();

        if closing && (self_closing || !attributes.trim().is_empty()) {
            return Err(MarkupError::Malformed(format!(
                "closing tag </{}> cannot carry attributes",
                name
            )));
        }

        match name {
            "speak" if closing => {
                if !self.inside_root {
                    return Err(MarkupError::Malformed("unexpected </speak>".to_string()));
                }
                self.inside_root = false;
            }
            "speak" => {
                if self.root_seen {
                    return Err(MarkupError::Malformed(
                        "only one <speak> root element is allowed".to_string(),
                    ));
                }
                read_attributes(name, attributes, &SPEAK_ATTRIBUTES)?;
                self.root_seen = true;
                self.inside_root = !self_closing;
            }
            "break" => {
                if !self.inside_root {
                    return Err(MarkupError::Malformed(
                        "<break> must appear inside <speak>".to_string(),
                    ));
                }
                if closing || !self_closing {
                    return Err(MarkupError::Malformed(
                        "<break> must be self-closing".to_string(),
                    ));
                }
                let pause = self.pause(read_attributes(name, attributes, &BREAK_ATTRIBUTES)?)?;
                self.nodes.push(MarkupNode::Pause(pause));
            }
            other => return Err(MarkupError::DisallowedTag(other.to_string())),
        }

        Ok(())
    }

    fn pause(&self, attributes: Vec<(String, String)>) -> Result<Pause, MarkupError> {
        let mut pause = Pause::default();
        for (name, value) in attributes {
            match name.as_str() {
                "time" => pause.time = Some(parse_break_time(&value, self.max_pause)?),
                "strength" => {
                    if !BREAK_STRENGTHS.contains(&value.as_str()) {
                        return Err(MarkupError::InvalidStrength(value));
                    }
                    pause.strength = Some(value);
                }
                other => {
                    return Err(MarkupError::DisallowedAttribute {
                        tag: "break".to_string(),
                        attribute: other.to_string(),
                    })
                }
            }
        }
        Ok(pause)
    }
}

fn read_attributes(
    tag: &str,
    raw: &str,
    allowed: &[&str],
) -> Result<Vec<(String, String)>, MarkupError> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for captures in ATTRIBUTE_PATTERN.captures_iter(raw) {
        let name = captures[1].to_string();
        if !allowed.contains(&name.as_str()) {
            return Err(MarkupError::DisallowedAttribute {
                tag: tag.to_string(),
                attribute: name,
            });
        }
        if attributes.iter().any(|(existing, _)| *existing == name) {
            return Err(MarkupError::Malformed(format!(
                "duplicate attribute '{}' on <{}>",
                name, tag
            )));
        }
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map_or("", |m| m.as_str())
            .to_string();
        check_references(&value)?;
        attributes.push((name, value));
    }

    Ok(attributes)
}

/// Every `&` must start a predefined entity or a numeric reference to a
/// character that is legal in XML and would survive sanitization.
fn check_references(text: &str) -> Result<(), MarkupError> {
    for (index, _) in text.match_indices('&') {
        let captures = REFERENCE_PATTERN
            .captures(&text[index..])
            .ok_or_else(|| MarkupError::Malformed("unescaped '&'".to_string()))?;

        let code_point = match (captures.get(1), captures.get(2)) {
            (Some(decimal), _) => decimal.as_str().parse::<u32>().ok(),
            (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, None) => continue,
        };

        match code_point.and_then(char::from_u32) {
            Some(c) if is_xml_char(c) && !is_stripped_character(c) => {}
            _ => {
                return Err(MarkupError::InvalidCharacterReference(
                    captures[0].to_string(),
                ))
            }
        }
    }
    Ok(())
}

/// The XML 1.0 `Char` production
fn is_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x9 | 0xA | 0xD | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Parse an SSML break time such as `400ms` or `1.5s`, bounded by `max`
pub fn parse_break_time(value: &str, max: Duration) -> Result<Duration, MarkupError> {
    let trimmed = value.trim();
    let captures = DURATION_PATTERN
        .captures(trimmed)
        .ok_or_else(|| MarkupError::InvalidDuration(value.to_string()))?;

    let amount: f64 = captures[1]
        .parse()
        .map_err(|_| MarkupError::InvalidDuration(value.to_string()))?;
    let millis = match &captures[2] {
        "ms" => amount,
        _ => amount * 1000.0,
    };

    if millis > max.as_millis() as f64 {
        return Err(MarkupError::PauseTooLong {
            value: value.to_string(),
            max_millis: max.as_millis(),
        });
    }

    Ok(Duration::from_secs_f64(millis / 1000.0))
}
