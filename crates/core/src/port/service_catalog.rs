// Service Catalog Port
// Enumerates the services of a cluster when the caller did not name any

use crate::port::ProbeError;
use async_trait::async_trait;

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    /// List every service identifier (ARN) in `cluster`
    async fn list_services(&self, cluster: &str) -> Result<Vec<String>, ProbeError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory catalog keyed by cluster name
    #[derive(Default)]
    pub struct StaticCatalog {
        clusters: HashMap<String, Vec<String>>,
        calls: Mutex<usize>,
    }

    impl StaticCatalog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_cluster(mut self, cluster: impl Into<String>, services: Vec<&str>) -> Self {
            self.clusters.insert(
                cluster.into(),
                services.into_iter().map(String::from).collect(),
            );
            self
        }

        pub fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ServiceCatalog for StaticCatalog {
        async fn list_services(&self, cluster: &str) -> Result<Vec<String>, ProbeError> {
            *self.calls.lock().unwrap() += 1;
            self.clusters
                .get(cluster)
                .cloned()
                .ok_or_else(|| ProbeError::TargetNotFound(format!("cluster {}", cluster)))
        }
    }
}
