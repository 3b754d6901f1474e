//! HTTP request handlers, one module per resource.

pub mod categories;
pub mod health;
pub mod todos;
pub mod weather;

pub use health::health_check;
