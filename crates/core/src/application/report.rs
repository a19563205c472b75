// Outcome reporting - what the caller shows once a poll is over

use crate::domain::{Outcome, TargetSet};

/// User-facing summary of a finished poll
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Stable {
        retries: String,
        time_taken_seconds: String,
        minutes: i64,
    },
    Unstable {
        message: String,
        /// The budget was not positive, so the probe never ran
        never_attempted: bool,
    },
}

impl Report {
    pub fn from_outcome(target: &TargetSet, outcome: &Outcome) -> Self {
        let minutes = outcome.elapsed_minutes_rounded();
        if outcome.is_stable {
            Report::Stable {
                retries: outcome.attempt_count.to_string(),
                time_taken_seconds: outcome.elapsed_secs.to_string(),
                minutes,
            }
        } else {
            Report::Unstable {
                message: format!(
                    "Service(s): {} are not stable after {} minutes!",
                    target.services_json(),
                    minutes
                ),
                never_attempted: outcome.never_attempted(),
            }
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Report::Stable { .. })
    }

    /// Named step outputs (`retries`, `time-taken-seconds`); empty unless stable
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        match self {
            Report::Stable {
                retries,
                time_taken_seconds,
                ..
            } => vec![
                ("retries", retries.clone()),
                ("time-taken-seconds", time_taken_seconds.clone()),
            ],
            Report::Unstable { .. } => Vec::new(),
        }
    }
}
