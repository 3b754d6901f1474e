//! Server configuration.
//!
//! Loaded from environment variables with sensible defaults:
//!
//! | variable | default |
//! |---|---|
//! | `TODOCAST_BIND_ADDR` | `0.0.0.0:5000` |
//! | `TODOCAST_DEFAULT_CITY` | `Istanbul` |
//! | `TODOCAST_LOG` | `info,todocast=debug` |
//! | `WEATHER_API_KEY` | unset (demo weather) |
//! | `WEATHER_API_URL` | OpenWeatherMap current weather |
//! | `WEATHER_LANG` | `en` |
//! | `WEATHER_TIMEOUT_SECS` | `5` |

use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use todocast_weather::WeatherConfig;
use todocast_weather::config::DEFAULT_API_URL;

/// Errors from reading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse
    #[error("invalid value for {name}: '{value}' ({reason})")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
        /// Parser message
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// City used by `GET /api/weather` without a `city` parameter
    pub default_city: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// OpenWeatherMap API key; `None` or `demo-key` serves demo weather
    pub weather_api_key: Option<String>,
    /// Weather endpoint
    pub weather_api_url: String,
    /// Language for weather descriptions
    pub weather_lang: String,
    /// Weather request timeout
    pub weather_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            default_city: "Istanbul".to_string(),
            log_filter: "info,todocast=debug".to_string(),
            weather_api_key: None,
            weather_api_url: DEFAULT_API_URL.to_string(),
            weather_lang: "en".to_string(),
            weather_timeout: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `TODOCAST_BIND_ADDR` or
    /// `WEATHER_TIMEOUT_SECS` is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a malformed address or timeout.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = Self::default();

        if let Some(value) = get("TODOCAST_BIND_ADDR") {
            config.bind_addr = value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "TODOCAST_BIND_ADDR",
                    reason: e.to_string(),
                    value,
                }
            })?;
        }
        if let Some(value) = get("TODOCAST_DEFAULT_CITY") {
            config.default_city = value;
        }
        if let Some(value) = get("TODOCAST_LOG") {
            config.log_filter = value;
        }
        config.weather_api_key = get("WEATHER_API_KEY");
        if let Some(value) = get("WEATHER_API_URL") {
            config.weather_api_url = value;
        }
        if let Some(value) = get("WEATHER_LANG") {
            config.weather_lang = value;
        }
        if let Some(value) = get("WEATHER_TIMEOUT_SECS") {
            let secs: u64 = value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    name: "WEATHER_TIMEOUT_SECS",
                    reason: e.to_string(),
                    value,
                }
            })?;
            config.weather_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the listen address
    #[must_use]
    pub const fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Set the default weather city
    #[must_use]
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    /// Set the weather API key
    #[must_use]
    pub fn with_weather_api_key(mut self, key: impl Into<String>) -> Self {
        self.weather_api_key = Some(key.into());
        self
    }

    /// Weather client settings derived from this configuration
    #[must_use]
    pub fn weather_config(&self) -> WeatherConfig {
        let config = WeatherConfig::new()
            .with_api_url(self.weather_api_url.clone())
            .with_lang(self.weather_lang.clone())
            .with_timeout(self.weather_timeout);

        match &self.weather_api_key {
            Some(key) => config.with_api_key(key.clone()),
            None => config,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.default_city, "Istanbul");
        assert_eq!(config.weather_timeout, Duration::from_secs(5));
        assert!(config.weather_config().is_demo());
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("TODOCAST_BIND_ADDR", "127.0.0.1:8080"),
            ("TODOCAST_DEFAULT_CITY", "Ankara"),
            ("WEATHER_API_KEY", "secret"),
            ("WEATHER_LANG", "tr"),
            ("WEATHER_TIMEOUT_SECS", "2"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.default_city, "Ankara");

        let weather = config.weather_config();
        assert!(!weather.is_demo());
        assert_eq!(weather.lang, "tr");
        assert_eq!(weather.timeout, Duration::from_secs(2));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = load(&[("TODOCAST_DEFAULT_CITY", "  "), ("WEATHER_API_KEY", "")]).unwrap();
        assert_eq!(config.default_city, "Istanbul");
        assert_eq!(config.weather_api_key, None);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = load(&[("TODOCAST_BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "TODOCAST_BIND_ADDR", .. }));

        let err = load(&[("WEATHER_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("WEATHER_TIMEOUT_SECS"));
    }

    #[test]
    fn reads_dotenv_file_syntax() {
        let file = "# local overrides\nTODOCAST_DEFAULT_CITY=\"Ankara\"\nWEATHER_TIMEOUT_SECS=3\n";
        let vars: HashMap<String, String> = dotenvy::from_read_iter(file.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();

        let config = ServerConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.default_city, "Ankara");
        assert_eq!(config.weather_timeout, Duration::from_secs(3));
    }

    #[test]
    fn builders_override() {
        let config = ServerConfig::default()
            .with_default_city("Izmir")
            .with_weather_api_key("demo-key");
        assert_eq!(config.default_city, "Izmir");
        assert!(config.weather_config().is_demo());
    }
}
