//! # Todocast Testing
//!
//! Testing utilities and helpers for Todocast reducers and stores.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then builder for reducers
//! - Assertion helpers for reducer results
//!
//! ## Example
//!
//! ```ignore
//! use todocast_testing::{test_clock, SequentialIds};
//! use todocast_runtime::Store;
//!
//! #[tokio::test]
//! async fn creates_a_todo() {
//!     let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()));
//!     let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//!     store.send(TodoAction::Create { owner, draft }).await?;
//!
//!     assert_eq!(store.state(|s| s.count()).await, 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use todocast_core::environment::{Clock, IdGenerator};


/// Deterministic implementations of the environment traits.
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};
    use uuid::Uuid;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todocast_testing::mocks::FixedClock;
    /// use todocast_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
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

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Predictable id generator
    ///
    /// Yields `00000000-0000-0000-0000-000000000001`, then `...02`, and so on.
    ///
    /// # Example
    ///
    /// ```
    /// use todocast_testing::mocks::SequentialIds;
    /// use todocast_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator starting at 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIds, test_clock};
pub use reducer_test::ReducerTest;

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
    fn sequential_ids_never_repeat() {
        let ids = SequentialIds::new();
        let generated: Vec<_> = (0..100).map(|_| ids.next_id()).collect();
        let mut deduped = generated.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), generated.len());
    }
}
