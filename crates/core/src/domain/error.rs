// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("ECS services array must contain only strings")]
    NonStringService,

    #[error("ECS services array cannot be empty")]
    EmptyServiceList,

    #[error("Invalid ECS services specification: {0}")]
    MalformedServiceList(String),

    #[error("ECS cluster name cannot be empty")]
    EmptyCluster,

    #[error("Cluster {0} has no services to wait for")]
    NoServicesInCluster(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
