use axum::{body::Bytes, extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechResponse, SpeechServiceApi},
    error::AppResult,
    infrastructure::auth::RequestId,
};

pub struct SpeechController {
    speech_service: Arc<dyn SpeechServiceApi>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<dyn SpeechServiceApi>) -> Self {
        Self { speech_service }
    }

    /// POST /api/speech - Convert text or SSML to stored audio.
    ///
    /// The body is taken as raw bytes so that malformed JSON is reported
    /// as `MalformedRequest` rather than an extractor rejection.
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        Extension(request_id): Extension<RequestId>,
        body: Bytes,
    ) -> AppResult<Json<SpeechResponse>> {
        tracing::info!(
            request_id = %request_id.0,
            body_size = body.len(),
            "Speech request received"
        );

        let outcome = controller.speech_service.synthesize(&body).await?;

        Ok(Json(SpeechResponse::from(outcome)))
    }
}
