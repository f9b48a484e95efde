use aws_config::{retry::RetryConfig, BehaviorVersion, Region, SdkConfig};

/// Shared AWS configuration for the Polly and S3 clients.
///
/// SDK retries are disabled: each engine call and each storage write is made
/// exactly once, and throttling or faults surface to the caller as they happen.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        .load()
        .await
}
