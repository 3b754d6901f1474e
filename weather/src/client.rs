//! OpenWeatherMap API client implementation

use crate::config::WeatherConfig;
use crate::error::WeatherError;
use crate::{WeatherProvider, WeatherReport};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

/// Body of a successful current-weather response (fields we use)
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

impl CurrentWeather {
    #[allow(clippy::cast_possible_truncation)] // rounded Celsius fits easily in i32
    fn into_report(self) -> Result<WeatherReport, WeatherError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            WeatherError::ResponseParseFailed("response has no weather conditions".to_string())
        })?;

        Ok(WeatherReport {
            city: self.name,
            temperature: self.main.temp.round() as i32,
            description: condition.description,
            humidity: self.main.humidity,
            icon: condition.icon,
        })
    }
}

/// OpenWeatherMap API client
#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    api_url: String,
    lang: String,
}

impl OpenWeatherClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// - `WeatherError::MissingApiKey` if no API key is configured
    /// - `WeatherError::RequestFailed` if the HTTP client cannot be built
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url.clone(),
            lang: config.lang.clone(),
        })
    }

    /// Fetch current conditions for `city`
    ///
    /// # Errors
    ///
    /// - `WeatherError::CityNotFound` for an unknown or blank city
    /// - `WeatherError::Unauthorized` if the API key is rejected
    /// - `WeatherError::Api` for any other non-success status
    /// - `WeatherError::RequestFailed` for network failures and timeouts
    /// - `WeatherError::ResponseParseFailed` for an unexpected body
    #[tracing::instrument(skip(self), name = "weather_lookup")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        metrics::counter!("weather.requests.total").increment(1);

        let result = self.request(city).await;
        if let Err(error) = &result {
            metrics::counter!("weather.requests.failed").increment(1);
            tracing::warn!(%error, "Weather lookup failed");
        }
        result
    }

    async fn request(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::CityNotFound {
                city: city.to_string(),
            });
        }

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::RequestFailed(format!("request timed out: {e}"))
                } else {
                    WeatherError::RequestFailed(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<CurrentWeather>()
                .await
                .map_err(|e| WeatherError::ResponseParseFailed(e.to_string()))?
                .into_report(),
            StatusCode::NOT_FOUND => Err(WeatherError::CityNotFound {
                city: city.to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(WeatherError::Api {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.fetch(city).await
    }
}
