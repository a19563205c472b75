// Target Domain Model
// Which services to wait for, and how the caller's specification is parsed

use super::error::{DomainError, Result};
use serde_json::Value;

/// Marker meaning "every service in the cluster"
pub const WILDCARD: &str = "*";

/// Opaque handle passed to the readiness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    pub cluster: String,
    pub services: Vec<String>,
}

impl TargetSet {
    pub fn new(cluster: impl Into<String>, services: Vec<String>) -> Self {
        Self {
            cluster: cluster.into(),
            services,
        }
    }

    /// Services rendered as a JSON array, e.g. `["api","worker"]`
    pub fn services_json(&self) -> String {
        serde_json::to_string(&self.services).unwrap_or_else(|_| format!("{:?}", self.services))
    }
}

/// Caller's service specification, before resolution against a cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceSpec {
    /// Empty, absent or wildcard: enumerate the cluster
    All,
    /// Explicit, non-empty list of service names or ARNs
    Explicit(Vec<String>),
}

impl ServiceSpec {
    /// Parse the raw specification
    ///
    /// Accepts nothing, an empty string, `*`, or a JSON array of strings.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let raw = match raw.map(str::trim) {
            None => return Ok(Self::All),
            Some(s) if s.is_empty() || s == WILDCARD => return Ok(Self::All),
            Some(s) => s,
        };

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::MalformedServiceList(e.to_string()))?;

        let items = match value {
            Value::Array(items) => items,
            _ => return Err(DomainError::NonStringService),
        };

        let services = items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(DomainError::NonStringService),
            })
            .collect::<Result<Vec<_>>>()?;

        if services.is_empty() {
            return Err(DomainError::EmptyServiceList);
        }

        Ok(Self::Explicit(services))
    }
}
