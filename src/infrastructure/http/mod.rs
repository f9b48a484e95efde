use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::infrastructure::config::Config;
use crate::{
    controllers::{health, speech::SpeechController},
    infrastructure::auth::{origin_middleware, request_id_middleware},
};

/// Build the application router with all routes and layers
pub fn build_router(config: Arc<Config>, speech_controller: Arc<SpeechController>) -> Router {
    // Speech route (origin restricted)
    let speech_routes = Router::new()
        .route("/api/speech", post(SpeechController::synthesize))
        .with_state(speech_controller)
        .layer(middleware::from_fn_with_state(config.clone(), origin_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(config.clone())
        .merge(speech_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::OPTIONS, Method::POST])
        .allow_headers(Any);

    if config.allowed_origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(config.allowed_origin.trim_end_matches('/')) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                allowed_origin = %config.allowed_origin,
                "ALLOWED_ORIGIN is not a valid header value; CORS will allow no origins"
            );
            layer
        }
    }
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    speech_controller: Arc<SpeechController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(config.clone(), speech_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
