use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use speech_gateway::controllers::speech::SpeechController;
use speech_gateway::domain::speech::{SpeechService, ValidationRules};
use speech_gateway::infrastructure::aws::load_sdk_config;
use speech_gateway::infrastructure::config::{Config, LogFormat};
use speech_gateway::infrastructure::http::start_http_server;
use speech_gateway::infrastructure::repositories::{PollyTtsRepository, S3AudioStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Speech Gateway on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() {
        tracing::debug!(
            allowed_origin = %config.allowed_origin,
            voices = config.allowed_voices.len(),
            max_chars = config.max_chars,
            max_pause_seconds = config.max_pause_seconds,
            url_expiry_seconds = config.url_expiry_seconds,
            engine = %config.polly_engine,
            "Configuration loaded"
        );
    }

    if config.allowed_origin == "*" {
        tracing::warn!("ALLOWED_ORIGIN is '*'; requests from any browser origin are accepted");
    }

    let aws_config = load_sdk_config(&config.aws_region).await;

    tracing::info!(
        region = ?aws_config.region(),
        bucket = %config.audio_bucket,
        "AWS configuration loaded"
    );

    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    let s3_client = Arc::new(aws_sdk_s3::Client::new(&aws_config));
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repositories (wrap the AWS clients)
    let tts_repo = Arc::new(PollyTtsRepository::new(polly_client, &config.polly_engine));
    let audio_store = Arc::new(S3AudioStore::new(s3_client, config.audio_bucket.clone()));

    // 2. Service (pipeline over the repositories)
    let speech_service = Arc::new(SpeechService::new(
        tts_repo,
        audio_store,
        ValidationRules::from_config(&config),
        config.signed_url_ttl(),
    ));

    // 3. Controller
    let speech_controller = Arc::new(SpeechController::new(speech_service));

    start_http_server(config, speech_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speech_gateway=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
