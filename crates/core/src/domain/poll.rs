// Poll Domain Model

use super::target::TargetSet;

/// Immutable input of one poll
#[derive(Debug, Clone)]
pub struct PollRequest {
    /// Total wall-clock budget in seconds
    pub total_budget_secs: f64,
    pub target: TargetSet,
    pub verbose: bool,
}

impl PollRequest {
    pub fn new(total_budget_secs: f64, target: TargetSet, verbose: bool) -> Self {
        Self {
            total_budget_secs,
            target,
            verbose,
        }
    }

    /// Build a request from a budget expressed in minutes
    pub fn from_minutes(total_budget_mins: f64, target: TargetSet, verbose: bool) -> Self {
        Self::new(total_budget_mins * 60.0, target, verbose)
    }
}

/// Result of a single bounded sub-wait
///
/// Fatal probe failures are not a variant here: they travel as
/// `Err(ProbeError)` so only "not stable yet" can be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubWaitResult {
    Stable,
    NotYetStable,
}

/// Final verdict of a poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub is_stable: bool,
    /// Number of probe calls actually made (0 only when the budget was not positive)
    pub attempt_count: u32,
    pub elapsed_secs: f64,
}

impl Outcome {
    /// True when the poll ended without ever calling the probe
    pub fn never_attempted(&self) -> bool {
        self.attempt_count == 0
    }

    /// Elapsed time in whole minutes, rounded half away from zero
    pub fn elapsed_minutes_rounded(&self) -> i64 {
        (self.elapsed_secs / 60.0).round() as i64
    }
}
