// Application Layer - Use Cases and Polling Logic

pub mod constants;
pub mod deadline_scheduler;
pub mod report;
pub mod stability;
pub mod target_resolver;

// Re-exports
pub use deadline_scheduler::{DeadlineScheduler, PollState};
pub use report::Report;
pub use stability::{StabilityRequest, StabilityRun, StabilityService};
pub use target_resolver::TargetResolver;
