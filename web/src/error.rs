//! Error types for web handlers.
//!
//! `AppError` is the single error type returned by handlers. Domain, store and
//! weather errors convert into it, and it renders the JSON error envelope:
//!
//! ```json
//! { "success": false, "code": "NOT_FOUND", "message": "todo 42 not found" }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use todocast_runtime::StoreError;
use todocast_todos::TodoError;
use todocast_weather::WeatherError;

/// Application error type for web handlers.
///
/// Carries the HTTP status, a machine-readable code, a user-facing message and
/// an optional internal source that is logged but never sent to the client.
///
/// # Examples
///
/// ```ignore
/// async fn handler(owner: CurrentUser) -> Result<ApiResponse<Todo>, AppError> {
///     let todo = state.todos.state(|s| s.get_owned(&owner.0, id).cloned()).await?;
///     Ok(ApiResponse::new(todo))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: &'static str,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: &'static str) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Attach an internal source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message.into(), "BAD_REQUEST")
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message.into(), "UNAUTHORIZED")
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message.into(), "FORBIDDEN")
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message.into(), "NOT_FOUND")
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR",
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR",
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE",
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Always `false`
    success: bool,
    /// Error code (for client error handling).
    code: &'static str,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            match &self.source {
                Some(source) => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    error = %source,
                    "Server error"
                ),
                None => tracing::error!(
                    status = %self.status,
                    code = self.code,
                    message = %self.message,
                    "Server error"
                ),
            }
        }

        let body = ErrorResponse {
            success: false,
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        let message = err.to_string();
        match err {
            TodoError::Validation { .. } | TodoError::InvalidEnumValue { .. } => {
                Self::validation(message)
            }
            TodoError::NotFound { .. } => Self::not_found(message),
            TodoError::Ownership { .. } => Self::forbidden(message),
        }
    }
}

impl From<StoreError<TodoError>> for AppError {
    fn from(err: StoreError<TodoError>) -> Self {
        match err {
            StoreError::Rejected(err) => err.into(),
            StoreError::ShutdownInProgress => {
                Self::unavailable("service is shutting down").with_source(err.into())
            }
        }
    }
}

impl From<WeatherError> for AppError {
    fn from(err: WeatherError) -> Self {
        if err.is_unavailable() {
            Self::unavailable("weather service unavailable").with_source(err.into())
        } else {
            Self::not_found(err.to_string())
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = rejection.status();
        let message = rejection.body_text();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            Self::validation(message)
        } else {
            Self::new(status, message, "BAD_REQUEST")
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn domain_errors_map_to_status() {
        let cases = [
            (TodoError::validation("too short"), StatusCode::UNPROCESSABLE_ENTITY),
            (
                TodoError::invalid_value("priority", "urgent"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                TodoError::NotFound {
                    resource: "todo",
                    id: "1".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                TodoError::Ownership {
                    resource: "todo",
                    id: "1".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn validation_code() {
        let err = AppError::from(TodoError::validation("bad"));
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn shutdown_is_unavailable() {
        let err = AppError::from(StoreError::<TodoError>::ShutdownInProgress);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn weather_errors_split_on_availability() {
        let missing = AppError::from(WeatherError::CityNotFound {
            city: "Atlantis".to_string(),
        });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let down = AppError::from(WeatherError::RequestFailed("timeout".to_string()));
        assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(std::error::Error::source(&down).is_some());
    }
}
