//! # Todocast Core
//!
//! Core traits and environment abstractions shared by every Todocast crate.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a store (todos, categories)
//! - **Action**: A command asking the state to change
//! - **Reducer**: Function `(State, Action, Environment) → Result<Output, Error>`
//! - **Environment**: Injected dependencies (clock, id generation) via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Validation before mutation: a rejected action leaves state untouched
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use todocast_core::reducer::Reducer;
//!
//! impl Reducer for CategoryReducer {
//!     type State = CategoryState;
//!     type Action = CategoryAction;
//!     type Environment = CategoryEnvironment;
//!     type Output = Category;
//!     type Error = TodoError;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CategoryState,
//!         action: CategoryAction,
//!         env: &CategoryEnvironment,
//!     ) -> Result<Category, TodoError> {
//!         // Validate, then mutate
//!         let category = validate(&action, env)?;
//!         state.categories.push(category.clone());
//!         Ok(category)
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

/// Reducer module - The core trait for business logic
///
/// Reducers are functions: `(State, Action, Environment) → Result<Output, Error>`
///
/// They contain all business logic and are deterministic given their environment.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Output`: What an accepted action produces (usually an event)
    /// - `Error`: Why an action was rejected
    ///
    /// # Contract
    ///
    /// An implementation must validate the action completely before touching
    /// `state`. When `reduce` returns `Err`, the state is exactly as it was.
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Environment = TodoEnvironment;
    ///     type Output = TodoEvent;
    ///     type Error = TodoError;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut TodoState,
    ///         action: TodoAction,
    ///         env: &TodoEnvironment,
    ///     ) -> Result<TodoEvent, TodoError> {
    ///         match action {
    ///             TodoAction::Delete { owner, id } => {
    ///                 // Validation and state changes here
    ///             }
    ///             // ...
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The value produced by an accepted action
        type Output;

        /// The error produced by a rejected action
        type Error;

        /// Reduce an action into a state change
        ///
        /// This function:
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns what happened
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is rejected. The state is
        /// left unchanged in that case.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<Self::Output, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All sources of non-determinism (time, identifiers) are abstracted behind
/// traits and injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use todocast_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let before = clock.now();
    /// assert!(clock.now() >= before);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// `IdGenerator` trait - abstracts identifier assignment
    ///
    /// Identifiers are never reused: every call must return a value that
    /// has not been returned before.
    pub trait IdGenerator: Send + Sync {
        /// Produce a fresh identifier
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator producing random v4 UUIDs.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomIds;

    impl IdGenerator for RandomIds {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::environment::{Clock, IdGenerator, RandomIds, SystemClock};

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn random_ids_are_distinct() {
        let ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
