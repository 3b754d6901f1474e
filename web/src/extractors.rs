//! Custom Axum extractors.
//!
//! - `CurrentUser`: the acting owner, from the `X-User` header
//! - `CorrelationId`: the request's correlation id
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     CurrentUser(owner): CurrentUser,
//!     correlation_id: CorrelationId,
//! ) -> Result<ApiResponse<Vec<Todo>>, AppError> {
//!     tracing::info!(%owner, correlation_id = %correlation_id.0, "Listing todos");
//!     // ...
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use todocast_todos::Owner;
use uuid::Uuid;

/// Header carrying the acting username.
pub const USER_HEADER: &str = "X-User";

/// The authenticated owner of the request.
///
/// Read from the `X-User` header, trimmed. A missing, non-UTF-8 or blank
/// header is rejected with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Owner);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(format!("missing {USER_HEADER} header")))?;

        Owner::parse(header)
            .map(Self)
            .map_err(|_| AppError::unauthorized(format!("empty {USER_HEADER} header")))
    }
}

/// Correlation ID for request tracing.
///
/// Uses the id assigned by the correlation middleware when it is installed,
/// otherwise the `X-Correlation-ID` header, otherwise a fresh UUID v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Self>() {
            return Ok(*id);
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn current_user(req: Request<()>) -> Result<CurrentUser, AppError> {
        let (mut parts, ()) = req.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn user_header_is_trimmed() {
        let req = Request::builder()
            .header(USER_HEADER, "  ayse ")
            .body(())
            .unwrap();

        let CurrentUser(owner) = current_user(req).await.unwrap();
        assert_eq!(owner.as_str(), "ayse");
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let req = Request::builder().body(()).unwrap();
        let err = current_user(req).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn blank_user_is_unauthorized() {
        let req = Request::builder()
            .header(USER_HEADER, "   ")
            .body(())
            .unwrap();
        let err = current_user(req).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, uuid.to_string())
            .body(())
            .unwrap();

        let (mut parts, ()) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let assigned = Uuid::new_v4();
        let req = Request::builder()
            .header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string())
            .extension(CorrelationId(assigned))
            .body(())
            .unwrap();

        let (mut parts, ()) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(correlation_id.0, assigned);
    }
}
