// ReadinessProbe backed by the ECS `ServicesStable` waiter

use async_trait::async_trait;
use aws_sdk_ecs::client::Waiters;
use aws_sdk_ecs::error::ProvideErrorMetadata;
use aws_sdk_ecs::Client;
use aws_smithy_runtime_api::client::waiters::error::WaiterError;
use ecswait_core::domain::{SubWaitResult, TargetSet};
use ecswait_core::port::{ProbeError, ReadinessProbe};
use std::error::Error;
use std::fmt::Debug;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error_mapping::map_sdk_error;

/// DescribeServices (polled by the waiter) accepts at most 10 services
pub const MAX_SERVICES_PER_WAIT: usize = 10;

/// Readiness probe for a set of ECS services
///
/// Each `check` runs the SDK waiter once per batch of services, all batches
/// sharing `timeout` as one deadline. Hitting the max wait is the only
/// outcome reported as `NotYetStable`.
pub struct EcsReadinessProbe {
    client: Client,
}

impl EcsReadinessProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadinessProbe for EcsReadinessProbe {
    async fn check(
        &self,
        target: &TargetSet,
        timeout: Duration,
    ) -> Result<SubWaitResult, ProbeError> {
        let result = wait_in_batches(&target.services, timeout, |batch, remaining| {
            let client = self.client.clone();
            let cluster = target.cluster.clone();
            async move {
                let waited = client
                    .wait_until_services_stable()
                    .cluster(&cluster)
                    .set_services(Some(batch.clone()))
                    .wait(remaining)
                    .await;
                map_waiter_result(waited, &cluster, &batch)
            }
        })
        .await;

        if let Ok(SubWaitResult::NotYetStable) = result {
            debug!(
                cluster = %target.cluster,
                timeout_secs = timeout.as_secs_f64(),
                "Sub-wait timed out before services were stable"
            );
        }
        result
    }
}

/// Wait for `services` batch by batch within one shared `timeout`
///
/// Stable only when every batch is stable; the first batch that times out
/// (or a deadline spent before a batch starts) makes the whole call
/// `NotYetStable`. Errors stop immediately.
pub async fn wait_in_batches<F, Fut>(
    services: &[String],
    timeout: Duration,
    mut wait_batch: F,
) -> Result<SubWaitResult, ProbeError>
where
    F: FnMut(Vec<String>, Duration) -> Fut,
    Fut: Future<Output = Result<SubWaitResult, ProbeError>>,
{
    let deadline = Instant::now() + timeout;

    for batch in services.chunks(MAX_SERVICES_PER_WAIT) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(SubWaitResult::NotYetStable);
        }
        if wait_batch(batch.to_vec(), remaining).await? == SubWaitResult::NotYetStable {
            return Ok(SubWaitResult::NotYetStable);
        }
    }

    Ok(SubWaitResult::Stable)
}

/// Map one waiter run onto the retryable/fatal split
pub fn map_waiter_result<T, O, E>(
    result: Result<T, WaiterError<O, E>>,
    cluster: &str,
    services: &[String],
) -> Result<SubWaitResult, ProbeError>
where
    O: Debug,
    E: ProvideErrorMetadata + Error + Debug + 'static,
{
    match result {
        Ok(_) => Ok(SubWaitResult::Stable),
        Err(WaiterError::ExceededMaxWait(_)) => Ok(SubWaitResult::NotYetStable),
        Err(WaiterError::FailureState(_)) => Err(ProbeError::FailureState(format!(
            "services {:?} in cluster {} can no longer become stable",
            services, cluster
        ))),
        Err(WaiterError::OperationFailed(failed)) => Err(map_sdk_error(failed.error())),
        Err(other) => Err(ProbeError::Other(format!("{:?}", other))),
    }
}
