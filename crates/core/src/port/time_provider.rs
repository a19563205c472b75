// Time Provider Port (for testability)

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Clock that only moves when told to
    #[derive(Debug, Default)]
    pub struct ManualClock {
        now_millis: AtomicI64,
    }

    impl ManualClock {
        pub fn new(start_millis: i64) -> Self {
            Self {
                now_millis: AtomicI64::new(start_millis),
            }
        }

        pub fn advance_secs(&self, secs: f64) {
            let delta = (secs * 1000.0).round() as i64;
            self.now_millis.fetch_add(delta, Ordering::SeqCst);
        }

        pub fn set_millis(&self, millis: i64) {
            self.now_millis.store(millis, Ordering::SeqCst);
        }
    }

    impl TimeProvider for ManualClock {
        fn now_millis(&self) -> i64 {
            self.now_millis.load(Ordering::SeqCst)
        }
    }
}
