// Polling constants (No magic values)

/// Longest single wait the ECS stability waiter is asked for (10 minutes)
/// Independent of the caller's total budget; never configurable.
pub const CHUNK_CAP_SECS: f64 = 600.0;

/// Default total budget when the caller does not give one (minutes)
pub const DEFAULT_MAX_TIMEOUT_MINS: f64 = 15.0;
