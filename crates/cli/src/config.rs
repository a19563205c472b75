// CLI configuration: flags with GitHub Action input / environment fallbacks

use clap::{Parser, ValueEnum};
use ecswait_core::application::constants::DEFAULT_MAX_TIMEOUT_MINS;
use ecswait_core::application::StabilityRequest;
use ecswait_core::domain::AwsCredentials;
use ecswait_core::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Pretty,
    /// One JSON object per line
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ecs-wait")]
#[command(about = "Wait for Amazon ECS services to become stable", long_about = None)]
#[command(version)]
pub struct Cli {
    /// AWS access key ID (falls back to AWS_ACCESS_KEY_ID)
    #[arg(long, env = "INPUT_AWS-ACCESS-KEY-ID", hide_env_values = true)]
    pub aws_access_key_id: Option<String>,

    /// AWS secret access key (falls back to AWS_SECRET_ACCESS_KEY)
    #[arg(long, env = "INPUT_AWS-SECRET-ACCESS-KEY", hide_env_values = true)]
    pub aws_secret_access_key: Option<String>,

    /// AWS region (falls back to AWS_REGION)
    #[arg(long, env = "INPUT_AWS-REGION")]
    pub aws_region: Option<String>,

    /// ECS cluster name or ARN
    #[arg(long, env = "INPUT_ECS-CLUSTER")]
    pub ecs_cluster: String,

    /// JSON array of service names; empty or "*" waits for every service in the cluster
    #[arg(long, env = "INPUT_ECS-SERVICES")]
    pub ecs_services: Option<String>,

    /// Total time to wait, in minutes
    #[arg(long, env = "INPUT_MAX-TIMEOUT-MINS")]
    pub max_timeout_mins: Option<String>,

    /// Log every attempt ("true" enables; any other value, including empty, disables)
    #[arg(
        long,
        env = "INPUT_VERBOSE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub verbose: Option<String>,

    /// Log output format
    #[arg(long, env = "ECSWAIT_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Fully validated settings; building them makes no AWS call
#[derive(Debug)]
pub struct Settings {
    pub credentials: AwsCredentials,
    pub request: StabilityRequest,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        Self::from_cli_with_env(cli, |key| std::env::var(key).ok())
    }

    /// Same as `from_cli`, with an injectable environment lookup
    pub fn from_cli_with_env(
        cli: Cli,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let credentials = AwsCredentials::resolve(
            non_empty(cli.aws_access_key_id).or_else(|| env("AWS_ACCESS_KEY_ID")),
            non_empty(cli.aws_secret_access_key).or_else(|| env("AWS_SECRET_ACCESS_KEY")),
            non_empty(cli.aws_region).or_else(|| env("AWS_REGION")),
        )?;

        let max_timeout_mins = parse_minutes(cli.max_timeout_mins.as_deref())?;

        Ok(Self {
            credentials,
            request: StabilityRequest {
                cluster: cli.ecs_cluster,
                services: cli.ecs_services,
                max_timeout_mins,
                verbose: parse_verbose(cli.verbose.as_deref()),
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Only "true" (any case) turns verbose logging on
pub fn parse_verbose(raw: Option<&str>) -> bool {
    raw.map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Parse the budget in minutes; absent or blank means the default
pub fn parse_minutes(raw: Option<&str>) -> Result<f64, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_MAX_TIMEOUT_MINS),
        Some(s) => s
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .ok_or_else(|| AppError::Config(format!("Invalid max-timeout-mins: {}", s))),
    }
}
