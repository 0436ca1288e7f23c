use aws_config::{BehaviorVersion, Region, SdkConfig};

use super::app_config::AWS_REGION;

pub async fn load_aws_config() -> SdkConfig {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(AWS_REGION))
        .load()
        .await;

    tracing::info!("AWS config loaded for region {}", AWS_REGION);

    config
}
