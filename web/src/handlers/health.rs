//! Health check and metrics endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use todocast_runtime::{HealthCheck, HealthReport};

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
/// This endpoint does NOT check the stores.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness check over both stores.
///
/// # Status Codes
///
/// - 200 OK: both stores accept commands
/// - 503 Service Unavailable: any store is shutting down
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
pub async fn readiness<W>(State(state): State<AppState<W>>) -> (StatusCode, Json<HealthReport>) {
    let todo_count = state.todos.state(todocast_todos::TodoState::count).await;
    let category_count = state
        .categories
        .state(todocast_todos::CategoryState::count)
        .await;

    let report = HealthReport::new(vec![
        HealthCheck {
            component: "todos".to_string(),
            ..state.todos.health()
        }
        .with_metadata("records", todo_count.to_string()),
        HealthCheck {
            component: "categories".to_string(),
            ..state.categories.health()
        }
        .with_metadata("records", category_count.to_string()),
    ]);

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}

/// Prometheus scrape endpoint.
///
/// # Errors
///
/// Returns 404 when no metrics recorder is installed.
#[allow(clippy::unused_async)]
pub async fn metrics<W>(State(state): State<AppState<W>>) -> Result<impl IntoResponse, AppError> {
    let handle = state
        .metrics
        .as_ref()
        .ok_or_else(|| AppError::not_found("metrics are not enabled"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, body) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
