// ECS client construction from static credentials

use aws_sdk_ecs::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_ecs::{Client, Config};
use ecswait_core::domain::AwsCredentials;
use tracing::debug;

const CREDENTIALS_PROVIDER_NAME: &str = "ecswait-static";

/// Build an ECS client for `credentials.region`
///
/// No network I/O happens here; bad credentials surface on the first call.
pub fn connect(credentials: &AwsCredentials) -> Client {
    debug!(region = %credentials.region, "Creating ECS client");

    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(credentials.region.clone()))
        .credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        ))
        .build();

    Client::from_conf(config)
}
