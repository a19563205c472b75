// ECS Wait Infrastructure - Amazon ECS Adapters
// Implements: ReadinessProbe, ServiceCatalog

pub mod connection;
pub mod error_mapping;
pub mod readiness_probe_impl;
pub mod service_catalog_impl;

pub use connection::connect;
pub use readiness_probe_impl::EcsReadinessProbe;
pub use service_catalog_impl::EcsServiceCatalog;
