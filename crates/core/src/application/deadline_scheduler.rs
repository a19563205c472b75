//! Deadline Scheduler - Polls a readiness probe in bounded chunks until a total budget runs out
//!
//! The ECS waiter only accepts a capped per-call timeout, so a long budget is
//! split into successive sub-waits of at most `CHUNK_CAP_SECS`. Elapsed time is
//! measured from the injected clock after every call, so a call that overruns
//! its chunk (network latency) shrinks the next one.
//!
//! Termination: the probe reports `Stable`, the budget is spent, or the probe
//! fails. Failures are not retried and no partial `Outcome` is produced.

use crate::application::constants::CHUNK_CAP_SECS;
use crate::domain::{Outcome, PollRequest, SubWaitResult};
use crate::port::{ProbeError, ReadinessProbe, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Size of the next sub-wait given the budget and the time already spent
pub fn next_chunk_secs(total_budget_secs: f64, elapsed_secs: f64) -> f64 {
    CHUNK_CAP_SECS.min(total_budget_secs - elapsed_secs)
}

/// Budgets that are not finite and positive never start a probe
fn effective_budget(total_budget_secs: f64) -> f64 {
    if total_budget_secs.is_finite() && total_budget_secs > 0.0 {
        total_budget_secs
    } else {
        0.0
    }
}

/// Loop accumulator, replaced by a new value after every attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollState {
    pub attempt_count: u32,
    pub elapsed_secs: f64,
    pub is_stable: bool,
    pub next_chunk_secs: f64,
}

impl PollState {
    pub fn initial(total_budget_secs: f64) -> Self {
        Self {
            attempt_count: 0,
            elapsed_secs: 0.0,
            is_stable: false,
            next_chunk_secs: next_chunk_secs(total_budget_secs, 0.0),
        }
    }

    /// Loop guard: chunk left, budget left, not stable yet
    pub fn should_continue(&self, total_budget_secs: f64) -> bool {
        self.next_chunk_secs > 0.0 && self.elapsed_secs < total_budget_secs && !self.is_stable
    }

    /// Fold one finished attempt into the state
    ///
    /// `measured_elapsed_secs` is the wall-clock time since the poll started.
    /// Elapsed time never goes backwards even if the clock does.
    pub fn advance(
        self,
        result: SubWaitResult,
        measured_elapsed_secs: f64,
        total_budget_secs: f64,
    ) -> Self {
        let elapsed_secs = self.elapsed_secs.max(measured_elapsed_secs);
        Self {
            attempt_count: self.attempt_count + 1,
            elapsed_secs,
            is_stable: self.is_stable || result == SubWaitResult::Stable,
            next_chunk_secs: next_chunk_secs(total_budget_secs, elapsed_secs),
        }
    }

    pub fn into_outcome(self) -> Outcome {
        Outcome {
            is_stable: self.is_stable,
            attempt_count: self.attempt_count,
            elapsed_secs: self.elapsed_secs,
        }
    }
}

/// Drives the bounded-retry loop for one poll at a time
pub struct DeadlineScheduler {
    probe: Arc<dyn ReadinessProbe>,
    time_provider: Arc<dyn TimeProvider>,
}

impl DeadlineScheduler {
    pub fn new(probe: Arc<dyn ReadinessProbe>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            probe,
            time_provider,
        }
    }

    /// Poll until stable or out of budget
    ///
    /// # Returns
    /// - `Ok(Outcome)` with `is_stable == true` on success
    /// - `Ok(Outcome)` with `is_stable == false` when the budget ran out
    ///   (`attempt_count == 0` if the budget was never positive)
    ///
    /// # Errors
    /// The first `ProbeError` raised by the probe, unchanged
    pub async fn poll(&self, request: &PollRequest) -> Result<Outcome, ProbeError> {
        let budget = effective_budget(request.total_budget_secs);
        let start_millis = self.time_provider.now_millis();
        let mut state = PollState::initial(budget);

        while state.should_continue(budget) {
            let attempt = state.attempt_count + 1;
            if request.verbose {
                info!("Waiting for service stability, try #{}", attempt);
            }
            debug!(
                cluster = %request.target.cluster,
                attempt = attempt,
                chunk_secs = state.next_chunk_secs,
                elapsed_secs = state.elapsed_secs,
                "Starting sub-wait"
            );

            let timeout = Duration::from_secs_f64(state.next_chunk_secs);
            let result = self
                .probe
                .check(&request.target, timeout)
                .await
                .map_err(|e| {
                    error!(
                        cluster = %request.target.cluster,
                        attempt = attempt,
                        error = %e,
                        "Readiness probe failed"
                    );
                    e
                })?;

            if result == SubWaitResult::Stable {
                info!("Services are stable!");
            }

            state = state.advance(result, self.elapsed_secs(start_millis), budget);
        }

        if !state.is_stable && state.attempt_count > 0 {
            warn!(
                cluster = %request.target.cluster,
                attempts = state.attempt_count,
                elapsed_secs = state.elapsed_secs,
                budget_secs = budget,
                "Budget exhausted before services became stable"
            );
        }

        Ok(state.into_outcome())
    }

    fn elapsed_secs(&self, start_millis: i64) -> f64 {
        (self.time_provider.now_millis() - start_millis) as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TargetSet;
    use crate::port::readiness_probe::mocks::{ScriptStep, ScriptedProbe};
    use crate::port::time_provider::mocks::ManualClock;
    use crate::port::time_provider::SystemTimeProvider;

    fn request(budget_secs: f64) -> PollRequest {
        PollRequest::new(
            budget_secs,
            TargetSet::new("prod", vec!["api".to_string()]),
            true,
        )
    }

    fn scheduler(probe: Arc<ScriptedProbe>, clock: Arc<ManualClock>) -> DeadlineScheduler {
        DeadlineScheduler::new(probe, clock)
    }

    #[tokio::test]
    async fn test_non_positive_budget_never_probes() {
        for budget in [0.0, -1.0, -600.0, f64::NAN, f64::INFINITY] {
            let clock = Arc::new(ManualClock::new(0));
            let probe = Arc::new(ScriptedProbe::always_stable().with_clock(clock.clone()));
            let outcome = scheduler(probe.clone(), clock).poll(&request(budget)).await.unwrap();

            assert_eq!(
                outcome,
                Outcome {
                    is_stable: false,
                    attempt_count: 0,
                    elapsed_secs: 0.0
                }
            );
            assert!(outcome.never_attempted());
            assert_eq!(probe.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_stable_on_first_call() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(
            ScriptedProbe::new(vec![ScriptStep::stable().taking_secs(42.0)])
                .with_clock(clock.clone()),
        );

        let outcome = scheduler(probe.clone(), clock).poll(&request(1800.0)).await.unwrap();

        assert!(outcome.is_stable);
        assert_eq!(outcome.attempt_count, 1);
        assert_eq!(outcome.elapsed_secs, 42.0);
        assert_eq!(probe.requested_secs(), vec![600.0]);
    }

    #[tokio::test]
    async fn test_tiny_positive_budget_counts_one_attempt() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(ScriptedProbe::always_stable().with_clock(clock.clone()));

        let outcome = scheduler(probe.clone(), clock).poll(&request(0.5)).await.unwrap();

        assert!(outcome.is_stable);
        assert_eq!(outcome.attempt_count, 1);
        assert_eq!(probe.requested_secs(), vec![0.5]);
    }

    #[tokio::test]
    async fn test_never_stable_exact_multiple_of_cap() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(ScriptedProbe::never_stable().with_clock(clock.clone()));

        let outcome = scheduler(probe.clone(), clock).poll(&request(1200.0)).await.unwrap();

        assert!(!outcome.is_stable);
        assert_eq!(outcome.attempt_count, 2);
        assert_eq!(outcome.elapsed_secs, 1200.0);
        assert_eq!(probe.requested_secs(), vec![600.0, 600.0]);
    }

    #[tokio::test]
    async fn test_chunk_sequence_for_1500_seconds() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(ScriptedProbe::never_stable().with_clock(clock.clone()));

        let outcome = scheduler(probe.clone(), clock).poll(&request(1500.0)).await.unwrap();

        assert_eq!(probe.requested_secs(), vec![600.0, 600.0, 300.0]);
        assert_eq!(outcome.attempt_count, 3);
        assert_eq!(outcome.elapsed_secs, 1500.0);
    }

    #[tokio::test]
    async fn test_drift_shrinks_following_chunks() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(
            ScriptedProbe::new(vec![ScriptStep::not_yet_stable().taking_secs(650.0)])
                .with_clock(clock.clone()),
        );

        let outcome = scheduler(probe.clone(), clock).poll(&request(1500.0)).await.unwrap();

        // 650 spent on the first call, then 600, then what is left
        assert_eq!(probe.requested_secs(), vec![600.0, 600.0, 250.0]);
        assert_eq!(outcome.elapsed_secs, 1500.0);
        assert!(!outcome.is_stable);
    }

    #[tokio::test]
    async fn test_overrun_past_budget_stops_loop() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(
            ScriptedProbe::new(vec![ScriptStep::not_yet_stable().taking_secs(700.0)])
                .with_clock(clock.clone()),
        );

        let outcome = scheduler(probe.clone(), clock).poll(&request(600.0)).await.unwrap();

        assert_eq!(probe.call_count(), 1);
        assert_eq!(outcome.attempt_count, 1);
        assert_eq!(outcome.elapsed_secs, 700.0);
    }

    #[tokio::test]
    async fn test_chunk_never_exceeds_cap_for_long_budget() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(ScriptedProbe::never_stable().with_clock(clock.clone()));

        let outcome = scheduler(probe.clone(), clock).poll(&request(36_000.0)).await.unwrap();

        assert_eq!(outcome.attempt_count, 60);
        assert!(probe.requested_secs().iter().all(|s| *s <= CHUNK_CAP_SECS));
    }

    #[tokio::test]
    async fn test_stable_after_retries() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(
            ScriptedProbe::new(vec![
                ScriptStep::not_yet_stable(),
                ScriptStep::not_yet_stable(),
                ScriptStep::stable().taking_secs(30.0),
            ])
            .with_clock(clock.clone()),
        );

        let outcome = scheduler(probe.clone(), clock).poll(&request(3600.0)).await.unwrap();

        assert!(outcome.is_stable);
        assert_eq!(outcome.attempt_count, 3);
        assert_eq!(outcome.elapsed_secs, 1230.0);
        assert_eq!(probe.call_count(), 3);
    }

    #[tokio::test]
    async fn test_probe_error_propagates_without_further_calls() {
        let clock = Arc::new(ManualClock::new(0));
        let failure = ProbeError::AccessDenied("ecs:DescribeServices".to_string());
        let probe = Arc::new(
            ScriptedProbe::new(vec![
                ScriptStep::not_yet_stable(),
                ScriptStep::fail(failure.clone()),
                ScriptStep::stable(),
            ])
            .with_clock(clock.clone()),
        );

        let err = scheduler(probe.clone(), clock)
            .poll(&request(3600.0))
            .await
            .unwrap_err();

        assert_eq!(err, failure);
        assert_eq!(probe.call_count(), 2);
    }

    #[tokio::test]
    async fn test_probe_receives_request_target() {
        let clock = Arc::new(ManualClock::new(0));
        let probe = Arc::new(ScriptedProbe::always_stable().with_clock(clock.clone()));
        let req = request(60.0);

        scheduler(probe.clone(), clock).poll(&req).await.unwrap();

        assert_eq!(probe.seen_targets(), vec![req.target.clone()]);
    }

    #[test]
    fn test_backwards_clock_does_not_reduce_elapsed() {
        let state = PollState::initial(1200.0).advance(SubWaitResult::NotYetStable, 600.0, 1200.0);
        let state = state.advance(SubWaitResult::NotYetStable, 10.0, 1200.0);

        assert_eq!(state.elapsed_secs, 600.0);
        assert_eq!(state.next_chunk_secs, 600.0);
        assert_eq!(state.attempt_count, 2);
    }

    #[tokio::test]
    async fn test_system_clock_stable_first_call() {
        let probe = Arc::new(ScriptedProbe::always_stable());
        let sched = DeadlineScheduler::new(probe, Arc::new(SystemTimeProvider));

        let outcome = sched.poll(&request(300.0)).await.unwrap();

        assert!(outcome.is_stable);
        assert_eq!(outcome.attempt_count, 1);
        assert!(outcome.elapsed_secs < 300.0);
    }

    #[test]
    fn test_next_chunk_is_capped() {
        assert_eq!(next_chunk_secs(36_000.0, 0.0), CHUNK_CAP_SECS);
        assert_eq!(next_chunk_secs(1500.0, 1200.0), 300.0);
        assert!(next_chunk_secs(1500.0, 1600.0) < 0.0);
    }

    #[test]
    fn test_step_stable_ends_loop_with_budget_left() {
        let state = PollState::initial(3600.0);
        assert!(state.should_continue(3600.0));

        let state = state.advance(SubWaitResult::Stable, 5.0, 3600.0);
        assert!(state.is_stable);
        assert_eq!(state.attempt_count, 1);
        assert!(state.next_chunk_secs > 0.0);
        assert!(!state.should_continue(3600.0));
    }

    #[test]
    fn test_step_not_yet_stable_continues_until_budget_spent() {
        let state = PollState::initial(900.0).advance(SubWaitResult::NotYetStable, 600.0, 900.0);
        assert!(state.should_continue(900.0));
        assert_eq!(state.next_chunk_secs, 300.0);

        let state = state.advance(SubWaitResult::NotYetStable, 900.0, 900.0);
        assert!(!state.should_continue(900.0));
        assert_eq!(state.into_outcome().attempt_count, 2);
    }
}
