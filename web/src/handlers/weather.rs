//! Weather endpoints.
//!
//! ```text
//! GET /api/weather?city=Ankara   named city, or the configured default
//! GET /api/weather/:city         named city
//! ```
//!
//! Weather lookups need no `X-User` header.

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::extract::{
    Path, Query, State,
    rejection::{PathRejection, QueryRejection},
};
use serde::Deserialize;
use todocast_weather::{WeatherProvider, WeatherReport};

/// Query string for `GET /api/weather`
#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    /// City to look up
    pub city: Option<String>,
}

async fn lookup<W: WeatherProvider>(
    state: &AppState<W>,
    city: &str,
) -> Result<ApiResponse<WeatherReport>, AppError> {
    let report = state.weather.current(city.trim()).await?;
    tracing::debug!(city = %report.city, temperature = report.temperature, "Weather fetched");
    Ok(ApiResponse::new(report))
}

/// `GET /api/weather`
///
/// # Errors
///
/// 404 for an unknown city, 503 when the provider is unavailable.
pub async fn current<W: WeatherProvider>(
    State(state): State<AppState<W>>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<ApiResponse<WeatherReport>, AppError> {
    let Query(params) = params?;
    let city = params
        .city
        .filter(|city| !city.trim().is_empty())
        .unwrap_or_else(|| state.default_city.to_string());

    lookup(&state, &city).await
}

/// `GET /api/weather/:city`
///
/// # Errors
///
/// 404 for an unknown city, 503 when the provider is unavailable.
pub async fn by_city<W: WeatherProvider>(
    State(state): State<AppState<W>>,
    city: Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<WeatherReport>, AppError> {
    let Path(city) = city?;
    lookup(&state, &city).await
}
