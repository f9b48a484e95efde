pub mod audio_store;
pub mod polly_tts_repository;
pub mod s3_audio_store;
pub mod tts_repository;

pub use audio_store::{AudioStore, StorageError};
pub use polly_tts_repository::PollyTtsRepository;
pub use s3_audio_store::S3AudioStore;
pub use tts_repository::{EngineError, SynthesisParams, TtsRepository};
