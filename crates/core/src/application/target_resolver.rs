// Target resolution - turns the caller's service specification into a TargetSet

use crate::domain::{DomainError, ServiceSpec, TargetSet};
use crate::error::Result;
use crate::port::ServiceCatalog;
use std::sync::Arc;
use tracing::{debug, info};

pub struct TargetResolver {
    catalog: Arc<dyn ServiceCatalog>,
}

impl TargetResolver {
    pub fn new(catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { catalog }
    }

    /// Parse `raw_services` and resolve it against `cluster`
    ///
    /// A malformed specification is rejected before the catalog is consulted.
    pub async fn resolve_raw(&self, cluster: &str, raw_services: Option<&str>) -> Result<TargetSet> {
        let spec = ServiceSpec::parse(raw_services)?;
        self.resolve(cluster, spec).await
    }

    /// Resolve a parsed specification
    ///
    /// `ServiceSpec::All` is expanded to every service the cluster lists right now.
    pub async fn resolve(&self, cluster: &str, spec: ServiceSpec) -> Result<TargetSet> {
        let cluster = cluster.trim();
        if cluster.is_empty() {
            return Err(DomainError::EmptyCluster.into());
        }

        let services = match spec {
            ServiceSpec::Explicit(services) => services,
            ServiceSpec::All => {
                info!("ECS services not provided, using all services in the cluster");
                let services = self.catalog.list_services(cluster).await?;
                if services.is_empty() {
                    return Err(DomainError::NoServicesInCluster(cluster.to_string()).into());
                }
                services
            }
        };

        debug!(cluster = %cluster, count = services.len(), "Resolved target services");
        Ok(TargetSet::new(cluster, services))
    }
}
