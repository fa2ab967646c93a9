//! Shared SDK configuration.

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Shared config for `region`. No ambient credentials are loaded: identity
/// calls are unauthenticated and route calls are signed with identity pool
/// credentials. Retries are off so one route action is one request.
pub async fn load_shared_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .retry_config(RetryConfig::disabled())
        .no_credentials()
        .load()
        .await
}
