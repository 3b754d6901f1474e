//! Axum REST boundary for Todocast.
//!
//! Handlers are a thin imperative shell around the todo and category stores:
//!
//! 1. Extract the owner (`X-User`), path, query and JSON body
//! 2. Build a `TodoAction` / `CategoryAction`
//! 3. `send` it through the `Store`
//! 4. Map the accepted event to an [`ApiResponse`], or the error to an [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use todocast_web::{AppState, router};
//!
//! let env = TodoEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds));
//! let state = AppState::new(env, DemoWeather::new(), "Istanbul");
//! axum::serve(listener, router(state)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, CurrentUser, USER_HEADER};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use response::ApiResponse;
pub use router::router;
pub use state::AppState;
