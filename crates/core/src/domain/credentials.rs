// AWS credential triple, validated before any connection is made

use crate::error::{AppError, Result};
use std::fmt;

pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "AWS credentials were not found in inputs or environment variables.";

/// Static credentials and region for the ECS connection
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl AwsCredentials {
    /// Validate the three required values (empty counts as absent)
    pub fn resolve(
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
        region: Option<String>,
    ) -> Result<Self> {
        match (
            non_empty(access_key_id),
            non_empty(secret_access_key),
            non_empty(region),
        ) {
            (Some(access_key_id), Some(secret_access_key), Some(region)) => Ok(Self {
                access_key_id,
                secret_access_key,
                region,
            }),
            _ => Err(AppError::Config(MISSING_CREDENTIALS_MESSAGE.to_string())),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}
