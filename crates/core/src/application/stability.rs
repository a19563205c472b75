// Stability Service - resolve targets, then poll them under a deadline

use crate::application::deadline_scheduler::DeadlineScheduler;
use crate::application::report::Report;
use crate::application::target_resolver::TargetResolver;
use crate::domain::{Outcome, PollRequest, TargetSet};
use crate::error::Result;
use crate::port::{ReadinessProbe, ServiceCatalog, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Inputs of one wait, as given by the caller
#[derive(Debug, Clone)]
pub struct StabilityRequest {
    pub cluster: String,
    /// Raw service specification (JSON array, empty, or `*`)
    pub services: Option<String>,
    pub max_timeout_mins: f64,
    pub verbose: bool,
}

/// What a finished wait produced
#[derive(Debug, Clone)]
pub struct StabilityRun {
    pub target: TargetSet,
    pub outcome: Outcome,
}

impl StabilityRun {
    pub fn report(&self) -> Report {
        Report::from_outcome(&self.target, &self.outcome)
    }
}

pub struct StabilityService {
    resolver: TargetResolver,
    scheduler: DeadlineScheduler,
}

impl StabilityService {
    pub fn new(
        catalog: Arc<dyn ServiceCatalog>,
        probe: Arc<dyn ReadinessProbe>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            resolver: TargetResolver::new(catalog),
            scheduler: DeadlineScheduler::new(probe, time_provider),
        }
    }

    /// Resolve the target set and poll it
    ///
    /// # Errors
    /// - Validation errors from the service specification (no probe call made)
    /// - Probe errors from listing or from a sub-wait
    pub async fn run(&self, req: StabilityRequest) -> Result<StabilityRun> {
        let target = self
            .resolver
            .resolve_raw(&req.cluster, req.services.as_deref())
            .await?;

        let poll = PollRequest::from_minutes(req.max_timeout_mins, target, req.verbose);
        info!(
            cluster = %poll.target.cluster,
            services = %poll.target.services_json(),
            budget_secs = poll.total_budget_secs,
            "Waiting for ECS services to become stable"
        );

        let outcome = self.scheduler.poll(&poll).await?;

        Ok(StabilityRun {
            target: poll.target,
            outcome,
        })
    }
}
