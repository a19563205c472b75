// Port Layer - Interfaces for external dependencies

pub mod readiness_probe;
pub mod service_catalog;
pub mod time_provider; // For deterministic testing

// Re-exports
pub use readiness_probe::{ProbeError, ReadinessProbe};
pub use service_catalog::ServiceCatalog;
pub use time_provider::TimeProvider;
