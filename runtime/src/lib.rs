//! # Todocast Runtime
//!
//! Runtime implementation for the Todocast stores.
//!
//! This crate provides the Store runtime that owns domain state and runs
//! reducers against it.
//!
//! ## Core Components
//!
//! - **Store**: Owns state behind a `RwLock`, serializes every mutation
//! - **Health**: Store-level health checks for readiness probes
//! - **Metrics**: Prometheus recorder and metric descriptions
//!
//! ## Example
//!
//! ```ignore
//! use todocast_runtime::Store;
//!
//! let store = Store::new(
//!     TodoState::new(),
//!     TodoReducer::new(),
//!     environment,
//! );
//!
//! // Send an action
//! let event = store.send(TodoAction::ToggleComplete { owner, id }).await?;
//!
//! // Read state
//! let count = store.state(|s| s.count()).await;
//! ```

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todocast_core::reducer::Reducer;
use tokio::sync::RwLock;

/// Prometheus metrics for observability
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// # Type Parameters
    ///
    /// - `E`: The reducer's error type, surfaced unchanged through `Rejected`
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError<E> {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// The reducer rejected the action
        ///
        /// State is unchanged.
        #[error("{0}")]
        Rejected(E),
    }

    impl<E> StoreError<E> {
        /// Returns the reducer error, if the action was rejected by the reducer
        #[must_use]
        pub const fn rejection(&self) -> Option<&E> {
            match self {
                Self::Rejected(error) => Some(error),
                Self::ShutdownInProgress => None,
            }
        }
    }
}

pub use error::StoreError;

/// Health check status levels
///
/// Indicates the current health state of a component or system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Component is accepting commands
    Healthy,

    /// Component is shutting down and rejects commands
    Unhealthy,
}

impl HealthStatus {
    /// Check if status is healthy
    #[must_use]
    pub const fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Check if status is unhealthy
    #[must_use]
    pub const fn is_unhealthy(self) -> bool {
        matches!(self, Self::Unhealthy)
    }

    /// Get the worst status between two statuses
    #[must_use]
    pub const fn worst(self, other: Self) -> Self {
        match (self, other) {
            (Self::Healthy, Self::Healthy) => Self::Healthy,
            _ => Self::Unhealthy,
        }
    }
}

/// Health check result for a component
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    /// Name of the component being checked
    pub component: String,

    /// Current health status
    pub status: HealthStatus,

    /// Optional message providing details
    pub message: Option<String>,

    /// Optional metadata (e.g., record counts)
    pub metadata: Vec<(String, String)>,
}

impl HealthCheck {
    /// Create a healthy check result
    #[must_use]
    pub fn healthy(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Healthy,
            message: None,
            metadata: Vec::new(),
        }
    }

    /// Create an unhealthy check result
    #[must_use]
    pub fn unhealthy(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            metadata: Vec::new(),
        }
    }

    /// Add metadata to the health check
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

/// Aggregated health report
///
/// Combines multiple health checks into an overall system status.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Overall system status (worst of all checks)
    pub status: HealthStatus,

    /// Individual component checks
    pub checks: Vec<HealthCheck>,

    /// Timestamp when report was generated
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    /// Create a new health report from checks
    #[must_use]
    pub fn new(checks: Vec<HealthCheck>) -> Self {
        let status = checks
            .iter()
            .map(|c| c.status)
            .fold(HealthStatus::Healthy, HealthStatus::worst);

        Self {
            status,
            checks,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Check if overall system is healthy
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }
}

/// The `Store`: state behind a lock, mutated only by its reducer
pub mod store {
    use super::{Arc, AtomicBool, HealthCheck, Ordering, Reducer, RwLock, StoreError};

    /// The Store - runtime owner of a reducer's state
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// Every `send` holds the write lock for the whole reducer call, so two
    /// mutations never interleave. Readers only observe completed mutations.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::new(
    ///     CategoryState::new(),
    ///     CategoryReducer::new(),
    ///     environment,
    /// );
    ///
    /// let category = store.send(CategoryAction::Create {
    ///     owner,
    ///     name: "Work".to_string(),
    ///     color: None,
    /// }).await?;
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// # Arguments
        ///
        /// - `initial_state`: The starting state for the store
        /// - `reducer`: The reducer implementation (business logic)
        /// - `environment`: Injected dependencies
        ///
        /// # Returns
        ///
        /// A new Store instance ready to process actions
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
            }
        }

        /// Perform a health check on the Store
        ///
        /// A store is healthy while it accepts actions and unhealthy once
        /// shutdown has been initiated.
        #[must_use]
        pub fn health(&self) -> HealthCheck {
            if self.shutdown.load(Ordering::Acquire) {
                HealthCheck::unhealthy("store", "Store is shutting down")
            } else {
                HealthCheck::healthy("store")
            }
        }

        /// Stop accepting new actions
        ///
        /// Actions already holding the write lock run to completion; every
        /// later `send` fails with [`StoreError::ShutdownInProgress`].
        pub async fn shutdown(&self) {
            tracing::info!("Initiating shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);
            self.shutdown.store(true, Ordering::Release);

            // Wait for an in-flight mutation to release the lock
            drop(self.state.write().await);
            tracing::info!("Store shut down");
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the state write lock and returns its output.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
        /// - [`StoreError::Rejected`] if the reducer rejected the action
        ///
        /// # Example
        ///
        /// ```ignore
        /// let event = store.send(TodoAction::Delete { owner, id }).await?;
        /// ```
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<R::Output, StoreError<R::Error>>
        where
            R::Error: std::fmt::Display,
        {
            // Check if store is shutting down
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            // Create span for reducer execution
            let span = tracing::debug_span!("reducer_execution");
            let _enter = span.enter();

            let start = std::time::Instant::now();
            let result = self.reducer.reduce(&mut state, action, &self.environment);
            metrics::histogram!("store.reducer.duration_seconds")
                .record(start.elapsed().as_secs_f64());

            result.map_err(|error| {
                tracing::warn!(%error, "Action rejected");
                metrics::counter!("store.commands.rejected").increment(1);
                StoreError::Rejected(error)
            })
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.count()).await;
        /// ```
        ///
        /// # Arguments
        ///
        /// - `f`: Closure that receives a reference to state and returns a value
        ///
        /// # Returns
        ///
        /// The value returned by the closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Access the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }
    }
}

pub use store::Store;
