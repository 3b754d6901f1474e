//! Offline weather provider used when no real API key is configured.

use crate::error::WeatherError;
use crate::{WeatherProvider, WeatherReport};

/// Demo weather provider
///
/// Answers every city with the same fair-weather report.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemoWeather;

impl DemoWeather {
    /// Create a new demo provider
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The fixed report for `city`
    #[must_use]
    pub fn report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.trim().to_string(),
            temperature: 22,
            description: "clear sky".to_string(),
            humidity: 65,
            icon: "01d".to_string(),
        }
    }
}

impl WeatherProvider for DemoWeather {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        if city.trim().is_empty() {
            return Err(WeatherError::CityNotFound {
                city: city.to_string(),
            });
        }
        tracing::debug!(city, "Serving demo weather");
        Ok(Self::report(city))
    }
}
