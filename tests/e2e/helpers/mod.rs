use speech_gateway::controllers::speech::SpeechController;
use speech_gateway::domain::speech::{SpeechService, ValidationRules};
use speech_gateway::infrastructure::config::{Config, Environment, LogFormat};
use speech_gateway::infrastructure::http::build_router;
use speech_gateway::infrastructure::repositories::EngineError;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod assertions;
pub mod fakes;

use api_client::TestClient;
use fakes::{FakeAudioStore, FakeTtsRepository};

pub const FRONTEND_ORIGIN: &str = "https://speech.example.com";
pub const VALID_VOICE: &str = "validVoice";

pub struct TestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub config: Config,
    pub engine: Arc<FakeTtsRepository>,
    pub store: Arc<FakeAudioStore>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async { Self::start(FakeTtsRepository::default(), FakeAudioStore::default()).await }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Server task ends with the test runtime
        }
    }
}

#[allow(dead_code)]
impl TestContext {
    /// Start the app with a scripted engine failure
    pub async fn with_engine_error(error: EngineError) -> Self {
        Self::start(FakeTtsRepository::failing(error), FakeAudioStore::default()).await
    }

    /// Start the app with a custom audio store
    pub async fn with_store(store: FakeAudioStore) -> Self {
        Self::start(FakeTtsRepository::default(), store).await
    }

    pub async fn start(engine: FakeTtsRepository, store: FakeAudioStore) -> Self {
        let config = test_config();
        let engine = Arc::new(engine);
        let store = Arc::new(store);

        let speech_service = Arc::new(SpeechService::new(
            engine.clone(),
            store.clone(),
            ValidationRules::from_config(&config),
            config.signed_url_ttl(),
        ));
        let speech_controller = Arc::new(SpeechController::new(speech_service));
        let app = build_router(Arc::new(config.clone()), speech_controller);

        // Start server
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: TestClient::new(&base_url),
            config,
            engine,
            store,
        }
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Will be assigned by the OS
        aws_region: "us-east-1".to_string(),
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        audio_bucket: "speech-audio".to_string(),
        url_expiry_seconds: 900,
        allowed_origin: FRONTEND_ORIGIN.to_string(),
        allowed_voices: vec![VALID_VOICE.to_string(), "Joanna".to_string()],
        max_chars: 3000,
        max_pause_seconds: 10,
        polly_engine: "standard".to_string(),
    }
}
