//! Weather client configuration.

use std::time::Duration;

/// OpenWeatherMap current-weather endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// API key that selects the demo provider.
pub const DEMO_API_KEY: &str = "demo-key";

/// Weather provider configuration
///
/// # Example
///
/// ```
/// use todocast_weather::WeatherConfig;
/// use std::time::Duration;
///
/// let config = WeatherConfig::new()
///     .with_api_key("secret")
///     .with_lang("tr")
///     .with_timeout(Duration::from_secs(2));
///
/// assert!(!config.is_demo());
/// ```
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; absent or `demo-key` selects demo mode
    pub api_key: Option<String>,
    /// Endpoint for current conditions
    pub api_url: String,
    /// Language for condition descriptions
    pub lang: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Create a configuration in demo mode with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            lang: "en".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the endpoint URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the description language
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether lookups should be served by the demo provider
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_none_or(|key| key.is_empty() || key == DEMO_API_KEY)
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_mode_detection() {
        assert!(WeatherConfig::new().is_demo());
        assert!(WeatherConfig::new().with_api_key("demo-key").is_demo());
        assert!(WeatherConfig::new().with_api_key("  ").is_demo());
        assert!(!WeatherConfig::new().with_api_key("abc123").is_demo());
    }

    #[test]
    fn defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.lang, "en");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
