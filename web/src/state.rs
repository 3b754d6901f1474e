//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use todocast_core::environment::Clock;
use todocast_runtime::Store;
use todocast_todos::{
    CategoryAction, CategoryReducer, CategoryState, TodoAction, TodoEnvironment, TodoReducer,
    TodoState,
};

/// Store owning every todo.
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Store owning every category.
pub type CategoryStore = Store<CategoryState, CategoryAction, TodoEnvironment, CategoryReducer>;

/// Application state shared across all HTTP handlers.
///
/// Generic over the weather provider so tests can inject their own.
///
/// # Examples
///
/// ```ignore
/// let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds));
/// let state = AppState::new(env, DemoWeather::new(), "Istanbul");
/// let app = router(state);
/// ```
pub struct AppState<W> {
    /// Todo store
    pub todos: Arc<TodoStore>,
    /// Category store
    pub categories: Arc<CategoryStore>,
    /// Weather provider
    pub weather: Arc<W>,
    /// Clock used for derived values such as overdue counts
    pub clock: Arc<dyn Clock>,
    /// City used by `GET /api/weather` without a `city` parameter
    pub default_city: Arc<str>,
    /// Prometheus handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl<W> AppState<W> {
    /// Create state with fresh, empty stores sharing one environment.
    #[must_use]
    pub fn new(env: TodoEnvironment, weather: W, default_city: impl Into<Arc<str>>) -> Self {
        let clock = Arc::clone(&env.clock);
        Self {
            todos: Arc::new(Store::new(TodoState::new(), TodoReducer::new(), env.clone())),
            categories: Arc::new(Store::new(
                CategoryState::new(),
                CategoryReducer::new(),
                env,
            )),
            weather: Arc::new(weather),
            clock,
            default_city: default_city.into(),
            metrics: None,
        }
    }

    /// Expose metrics from this Prometheus handle at `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Stop both stores from accepting further commands.
    pub async fn shutdown(&self) {
        self.todos.shutdown().await;
        self.categories.shutdown().await;
    }
}

// Manual impl: `W` itself does not need to be `Clone`.
impl<W> Clone for AppState<W> {
    fn clone(&self) -> Self {
        Self {
            todos: Arc::clone(&self.todos),
            categories: Arc::clone(&self.categories),
            weather: Arc::clone(&self.weather),
            clock: Arc::clone(&self.clock),
            default_city: Arc::clone(&self.default_city),
            metrics: self.metrics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todocast_testing::{SequentialIds, test_clock};
    use todocast_weather::DemoWeather;

    fn state() -> AppState<DemoWeather> {
        let env = TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()));
        AppState::new(env, DemoWeather::new(), "Istanbul")
    }

    #[test]
    fn test_state_is_clone() {
        // Ensure AppState implements Clone (required for Axum)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState<DemoWeather>>();
    }

    #[tokio::test]
    async fn clones_share_stores() {
        let state = state();
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.todos, &clone.todos));
        assert_eq!(&*clone.default_city, "Istanbul");
    }

    #[tokio::test]
    async fn shutdown_stops_both_stores() {
        let state = state();
        state.shutdown().await;
        assert!(state.todos.health().status.is_unhealthy());
        assert!(state.categories.health().status.is_unhealthy());
    }
}
