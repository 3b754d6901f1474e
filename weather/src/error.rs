//! Error types for weather lookups

use thiserror::Error;

/// Errors that can occur when looking up the weather
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// No API key configured for the live client
    #[error("Missing weather API key")]
    MissingApiKey,

    /// The provider does not know this city
    #[error("City not found: {city}")]
    CityNotFound {
        /// The city that was requested
        city: String,
    },

    /// HTTP request failed or timed out
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - invalid API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// API returned an error
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },
}

impl WeatherError {
    /// Whether the provider itself is unusable, as opposed to the city being unknown
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        !matches!(self, Self::CityNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_city_is_available() {
        assert!(
            !WeatherError::CityNotFound {
                city: "Atlantis".to_string()
            }
            .is_unavailable()
        );
        assert!(WeatherError::Unauthorized.is_unavailable());
        assert!(WeatherError::RequestFailed("timeout".to_string()).is_unavailable());
        assert!(
            WeatherError::Api {
                status: 500,
                message: String::new()
            }
            .is_unavailable()
        );
    }
}
