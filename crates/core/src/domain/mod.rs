// Domain Layer - Pure values describing one poll

pub mod credentials;
pub mod error;
pub mod poll;
pub mod target;

// Re-exports
pub use credentials::AwsCredentials;
pub use error::DomainError;
pub use poll::{Outcome, PollRequest, SubWaitResult};
pub use target::{ServiceSpec, TargetSet, WILDCARD};
