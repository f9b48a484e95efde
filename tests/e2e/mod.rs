// End-to-end tests for the speech gateway HTTP API
//
// Each test starts the real axum router on an ephemeral port. The speech
// engine and the audio store are in-memory fakes injected through the
// repository traits, so tests can script engine failures and inspect what
// was (or was not) written to storage.

mod helpers;
mod test_health;
