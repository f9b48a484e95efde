use axum::{
    extract::{Request, State},
    http::header::ORIGIN,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::{error::AppError, infrastructure::config::Config};

/// Reject browser requests coming from anywhere but the configured frontend.
///
/// Requests without an `Origin` header (curl, server-to-server) pass through.
pub async fn origin_middleware(
    State(config): State<Arc<Config>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(origin) = request.headers().get(ORIGIN) {
        let origin = origin
            .to_str()
            .map_err(|_| AppError::OriginNotAllowed("<non-ascii origin>".to_string()))?;

        if !config.origin_allowed(origin) {
            return Err(AppError::OriginNotAllowed(origin.to_string()));
        }
    }

    Ok(next.run(request).await)
}
