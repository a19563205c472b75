// ServiceCatalog backed by ECS ListServices (all pages)

use async_trait::async_trait;
use aws_sdk_ecs::Client;
use ecswait_core::port::{ProbeError, ServiceCatalog};
use tracing::debug;

use crate::error_mapping::map_sdk_error;

pub struct EcsServiceCatalog {
    client: Client,
}

impl EcsServiceCatalog {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ServiceCatalog for EcsServiceCatalog {
    async fn list_services(&self, cluster: &str) -> Result<Vec<String>, ProbeError> {
        let arns = self
            .client
            .list_services()
            .cluster(cluster)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<String>, _>>()
            .await
            .map_err(|e| map_sdk_error(&e))?;

        debug!(cluster = %cluster, count = arns.len(), "Listed ECS services");
        Ok(arns)
    }
}
