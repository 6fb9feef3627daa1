//! # Todoit Testing
//!
//! Testing utilities and helpers for the todoit reducer architecture.
//!
//! This crate provides:
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Effect assertions and an effect resolver for feedback checks
//! - Deterministic clocks
//! - Tracing setup for tests that want log output
//!
//! ## Example
//!
//! ```ignore
//! use todoit_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(environment)
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::SetStatusFilter(StatusFilter::Active))
//!     .then_state(|state| assert_eq!(state.filter.status, StatusFilter::Active))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use todoit_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todoit_testing::mocks::FixedClock;
    /// use todoit_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by one second on every reading
    ///
    /// Rows stamped with it get strictly increasing creation times, so
    /// "newest first" ordering is deterministic in tests.
    #[derive(Debug, Clone)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        ticks: Arc<AtomicI64>,
    }

    impl SteppingClock {
        /// Create a clock whose first reading is `start`
        #[must_use]
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                start,
                ticks: Arc::new(AtomicI64::new(0)),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + chrono::Duration::seconds(tick)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// Create a stepping clock starting at 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn stepping_test_clock() -> SteppingClock {
        SteppingClock::new(test_epoch())
    }

    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which never happens.
    #[allow(clippy::expect_used)]
    fn test_epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber honouring `RUST_LOG` for the current test binary
    ///
    /// Safe to call from every test; only the first call installs anything.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, SteppingClock, stepping_test_clock, test_clock};
pub use reducer_test::{ReducerTest, assertions, resolve_effects};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_stepping_clock_is_strictly_increasing() {
        let clock = stepping_test_clock();
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, chrono::Duration::seconds(1));
    }
}
