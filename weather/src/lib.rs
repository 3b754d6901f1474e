//! # Todocast Weather
//!
//! Current-weather lookup for a city.
//!
//! ## Example
//!
//! ```no_run
//! use todocast_weather::{Weather, WeatherConfig, WeatherProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = WeatherConfig::new().with_api_key("your-openweathermap-key");
//!     let weather = Weather::from_config(&config)?;
//!
//!     let report = weather.current("Istanbul").await?;
//!     println!("{}: {} °C, {}", report.city, report.temperature, report.description);
//!     Ok(())
//! }
//! ```
//!
//! ## Providers
//!
//! - [`OpenWeatherClient`]: live OpenWeatherMap lookups over HTTP
//! - [`DemoWeather`]: fixed report, used when no real key is configured

use serde::Serialize;
use std::future::Future;

pub mod client;
pub mod config;
pub mod demo;
pub mod error;

// Re-export main types for convenience
pub use client::OpenWeatherClient;
pub use config::WeatherConfig;
pub use demo::DemoWeather;
pub use error::WeatherError;

/// Current conditions in a city
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    /// City name as reported by the provider
    pub city: String,
    /// Temperature in °C, rounded to the nearest degree
    pub temperature: i32,
    /// Human-readable conditions, e.g. "clear sky"
    pub description: String,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Provider icon code, e.g. `01d`
    pub icon: String,
}

/// Source of current weather conditions
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for `city`.
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::CityNotFound` for an unknown city; every other
    /// variant means the provider is unavailable.
    fn current(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<WeatherReport, WeatherError>> + Send;
}

/// The provider chosen by configuration
#[derive(Clone, Debug)]
pub enum Weather {
    /// Live OpenWeatherMap client
    Live(OpenWeatherClient),
    /// Fixed demo report
    Demo(DemoWeather),
}

impl Weather {
    /// Pick the live client when a real API key is configured, the demo provider otherwise
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::RequestFailed` if the HTTP client cannot be built.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        if config.is_demo() {
            tracing::info!("No weather API key configured, using demo weather");
            return Ok(Self::Demo(DemoWeather::new()));
        }
        Ok(Self::Live(OpenWeatherClient::new(config)?))
    }

    /// Whether this is the demo provider
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        matches!(self, Self::Demo(_))
    }
}

impl WeatherProvider for Weather {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        match self {
            Self::Live(client) => client.current(city).await,
            Self::Demo(demo) => demo.current(city).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn selects_provider_from_key() {
        assert!(Weather::from_config(&WeatherConfig::new()).unwrap().is_demo());
        assert!(
            Weather::from_config(&WeatherConfig::new().with_api_key("demo-key"))
                .unwrap()
                .is_demo()
        );
        assert!(
            !Weather::from_config(&WeatherConfig::new().with_api_key("live"))
                .unwrap()
                .is_demo()
        );
    }
}
