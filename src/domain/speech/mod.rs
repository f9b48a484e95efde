pub mod dto;
pub mod error;
pub mod markup;
pub mod model;
pub mod publisher;
pub mod request;
pub mod sanitizer;
pub mod service;
pub mod synthesizer;

pub use dto::SpeechResponse;
pub use error::SpeechError;
pub use model::{OutputFormat, PipelineStage, StoredObject, SynthesisRequest, SynthesisResult, TextType};
pub use sanitizer::{sanitize_content, SpeechValidator, ValidationRules};
pub use service::{SpeechOutcome, SpeechService, SpeechServiceApi};
