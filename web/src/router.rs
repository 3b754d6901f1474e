//! Router composition.

use crate::handlers::{categories, health, todos, weather};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use todocast_weather::WeatherProvider;
use tower_http::trace::TraceLayer;

/// Build the full application router.
///
/// # Routes
///
/// ## Operational
/// - `GET /health` - liveness
/// - `GET /health/ready` - store health
/// - `GET /metrics` - Prometheus text
///
/// ## Todos (require `X-User`)
/// - `GET|POST /api/todos`
/// - `GET /api/todos/stats`
/// - `GET|PATCH|DELETE /api/todos/:id`
/// - `POST /api/todos/:id/toggle`
/// - `POST /api/todos/:id/tags`
/// - `DELETE /api/todos/:id/tags/:tag`
///
/// ## Categories (require `X-User`)
/// - `GET|POST /api/categories`
///
/// ## Weather
/// - `GET /api/weather?city=`
/// - `GET /api/weather/:city`
///
/// The correlation id layer is outermost so the trace span sees the id.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(env, weather, "Istanbul").with_metrics(handle);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, router(state)).await?;
/// ```
pub fn router<W>(state: AppState<W>) -> Router
where
    W: WeatherProvider + 'static,
{
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness::<W>))
        .route("/metrics", get(health::metrics::<W>))
        .route("/api/todos", get(todos::list::<W>).post(todos::create::<W>))
        .route("/api/todos/stats", get(todos::stats::<W>))
        .route(
            "/api/todos/:id",
            get(todos::get::<W>)
                .patch(todos::update::<W>)
                .delete(todos::delete::<W>),
        )
        .route("/api/todos/:id/toggle", post(todos::toggle::<W>))
        .route("/api/todos/:id/tags", post(todos::add_tag::<W>))
        .route("/api/todos/:id/tags/:tag", delete(todos::remove_tag::<W>))
        .route(
            "/api/categories",
            get(categories::list::<W>).post(categories::create::<W>),
        )
        .route("/api/weather", get(weather::current::<W>))
        .route("/api/weather/:city", get(weather::by_city::<W>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
}
