use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Longest signed URL S3 will issue, also well inside the 14-day object lifecycle
pub const MAX_URL_EXPIRY_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Polly's text length limit
pub const MAX_CONTENT_CHARS: usize = 3000;

const DEFAULT_VOICES: &str = "Joanna,Matthew,Ivy,Justin,Kendra,Kimberly,Salli,Joey,Kevin,Ruth,Stephen,\
Amy,Brian,Emma,Arthur,Olivia,Aria,Ayanda,Lupe,Lucia,Sergio,Lea,Remi,Vicki,Daniel,Bianca,Adriano,\
Ines,Camila,Vitoria";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub aws_region: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Storage
    pub audio_bucket: String,
    pub url_expiry_seconds: u64,
    // Boundary
    pub allowed_origin: String,
    // Synthesis
    pub allowed_voices: Vec<String>,
    pub max_chars: usize,
    pub max_pause_seconds: u64,
    pub polly_engine: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            audio_bucket: env::var("AUDIO_BUCKET").context("AUDIO_BUCKET must be set")?,
            url_expiry_seconds: env::var("URL_EXPIRY_SECONDS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("URL_EXPIRY_SECONDS must be a whole number of seconds")?,
            allowed_origin: env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "*".to_string()),
            allowed_voices: parse_voice_list(
                &env::var("ALLOWED_VOICES").unwrap_or_else(|_| DEFAULT_VOICES.to_string()),
            ),
            max_chars: env::var("MAX_CHARS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("MAX_CHARS must be a positive integer")?,
            max_pause_seconds: env::var("MAX_PAUSE_SECONDS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("MAX_PAUSE_SECONDS must be a whole number of seconds")?,
            polly_engine: env::var("POLLY_ENGINE").unwrap_or_else(|_| "standard".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot honour
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.audio_bucket.trim().is_empty() {
            bail!("AUDIO_BUCKET must not be empty");
        }
        if self.allowed_voices.is_empty() {
            bail!("ALLOWED_VOICES must list at least one voice");
        }
        if self.max_chars == 0 || self.max_chars > MAX_CONTENT_CHARS {
            bail!("MAX_CHARS must be between 1 and {}", MAX_CONTENT_CHARS);
        }
        if self.url_expiry_seconds == 0 || self.url_expiry_seconds > MAX_URL_EXPIRY_SECONDS {
            bail!(
                "URL_EXPIRY_SECONDS must be between 1 and {}",
                MAX_URL_EXPIRY_SECONDS
            );
        }
        if self.allowed_origin != "*"
            && !(self.allowed_origin.starts_with("https://")
                || self.allowed_origin.starts_with("http://"))
        {
            bail!("ALLOWED_ORIGIN must be '*' or an http(s) origin");
        }
        if !self.allowed_origin.is_ascii() || self.allowed_origin.contains(char::is_whitespace) {
            bail!("ALLOWED_ORIGIN must be a plain ASCII origin");
        }
        Ok(())
    }

    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.url_expiry_seconds)
    }

    pub fn max_pause(&self) -> Duration {
        Duration::from_secs(self.max_pause_seconds)
    }

    /// Whether a browser `Origin` header matches the configured frontend
    pub fn origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origin == "*"
            || self.allowed_origin.trim_end_matches('/') == origin.trim_end_matches('/')
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_voice_list(raw: &str) -> Vec<String> {
    let mut voices: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|voice| !voice.is_empty())
        .map(str::to_string)
        .collect();
    voices.sort();
    voices.dedup();
    voices
}
