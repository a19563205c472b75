// Readiness Probe Port
// One bounded call to an external "are these services stable?" check

use crate::domain::{SubWaitResult, TargetSet};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Anything the readiness check reports other than "not stable yet"
///
/// Never retried: the scheduler propagates it unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Services reached a failure state: {0}")]
    FailureState(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Other(String),
}

/// Readiness probe port
///
/// Implementations:
/// - EcsReadinessProbe: ECS `ServicesStable` waiter
/// - mocks::ScriptedProbe: replays a fixed script (tests)
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Block for at most `timeout` waiting for `target` to become stable
    ///
    /// # Returns
    /// - `Ok(SubWaitResult::Stable)` once the external system confirms steady state
    /// - `Ok(SubWaitResult::NotYetStable)` when `timeout` elapses first
    ///
    /// # Errors
    /// Any other condition (missing target, denied access, transport failure)
    async fn check(
        &self,
        target: &TargetSet,
        timeout: Duration,
    ) -> Result<SubWaitResult, ProbeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::port::time_provider::mocks::ManualClock;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// One scripted probe response
    #[derive(Debug, Clone)]
    pub struct ScriptStep {
        result: Result<SubWaitResult, ProbeError>,
        /// Simulated duration of the call; `None` uses the requested timeout
        takes_secs: Option<f64>,
    }

    impl ScriptStep {
        pub fn stable() -> Self {
            Self {
                result: Ok(SubWaitResult::Stable),
                takes_secs: Some(0.0),
            }
        }

        /// Times out after consuming the whole requested timeout
        pub fn not_yet_stable() -> Self {
            Self {
                result: Ok(SubWaitResult::NotYetStable),
                takes_secs: None,
            }
        }

        pub fn fail(error: ProbeError) -> Self {
            Self {
                result: Err(error),
                takes_secs: Some(0.0),
            }
        }

        /// Override how long the call appears to take
        pub fn taking_secs(mut self, secs: f64) -> Self {
            self.takes_secs = Some(secs);
            self
        }
    }

    /// Probe that replays a script and records every requested timeout
    ///
    /// Once the script runs out it keeps answering `NotYetStable`.
    pub struct ScriptedProbe {
        script: Mutex<VecDeque<ScriptStep>>,
        timeouts: Mutex<Vec<Duration>>,
        targets: Mutex<Vec<TargetSet>>,
        clock: Option<Arc<ManualClock>>,
    }

    impl ScriptedProbe {
        pub fn new(script: Vec<ScriptStep>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                timeouts: Mutex::new(Vec::new()),
                targets: Mutex::new(Vec::new()),
                clock: None,
            }
        }

        pub fn always_stable() -> Self {
            Self::new(vec![ScriptStep::stable()])
        }

        pub fn never_stable() -> Self {
            Self::new(Vec::new())
        }

        /// Advance `clock` by each call's simulated duration
        pub fn with_clock(mut self, clock: Arc<ManualClock>) -> Self {
            self.clock = Some(clock);
            self
        }

        pub fn call_count(&self) -> usize {
            self.timeouts.lock().unwrap().len()
        }

        /// Requested timeouts in seconds, in call order
        pub fn requested_secs(&self) -> Vec<f64> {
            self.timeouts
                .lock()
                .unwrap()
                .iter()
                .map(Duration::as_secs_f64)
                .collect()
        }

        pub fn seen_targets(&self) -> Vec<TargetSet> {
            self.targets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReadinessProbe for ScriptedProbe {
        async fn check(
            &self,
            target: &TargetSet,
            timeout: Duration,
        ) -> Result<SubWaitResult, ProbeError> {
            self.timeouts.lock().unwrap().push(timeout);
            self.targets.lock().unwrap().push(target.clone());

            let step = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(ScriptStep::not_yet_stable);

            if let Some(clock) = &self.clock {
                clock.advance_secs(step.takes_secs.unwrap_or(timeout.as_secs_f64()));
            }

            step.result
        }
    }
}
