//! Weather fetcher for the dashboard pipeline
//!
//! One bounded HTTP GET against the OpenWeatherMap current-weather endpoint
//! per refresh cycle. There is no retry and no cache of a last-known-good
//! reading; a failed fetch aborts the whole cycle.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::WeatherConfig;
use crate::{Result, TrafficAiError};

/// Current weather observation for the covered city.
///
/// Ephemeral: created per fetch and discarded once the feature record has
/// been built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// Temperature in Celsius
    pub temperature: f64,
    /// Rainfall over the last hour in mm (0 when the provider omits it)
    pub rain_1h: f64,
    /// Snowfall over the last hour in mm (0 when the provider omits it)
    pub snow_1h: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover_pct: u8,
}

/// Source of current weather readings.
///
/// The production implementation is [`OpenWeatherClient`]; tests substitute
/// fixed or failing providers.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self) -> Result<WeatherReading>;
}

/// OpenWeatherMap client for a fixed city.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    city: String,
    country_code: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Build a client from the weather configuration.
    ///
    /// A missing API key is not an error here; the provider rejects the
    /// unauthenticated request and the fetch surfaces that as a
    /// [`TrafficAiError::Fetch`].
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .build()
            .map_err(|e| TrafficAiError::fetch(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            city: config.city.clone(),
            country_code: config.country_code.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }

    fn request_url(&self) -> String {
        format!(
            "{}/data/2.5/weather?q={},{}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(&self.city),
            self.country_code,
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[tracing::instrument(name = "fetch_weather", level = "debug", skip(self), fields(city = %self.city))]
    async fn fetch(&self) -> Result<WeatherReading> {
        let response = self
            .client
            .get(self.request_url())
            .send()
            .await
            .map_err(|e| TrafficAiError::fetch(format!("Weather request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrafficAiError::fetch(format!(
                "Weather API returned HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TrafficAiError::fetch(format!("Failed to read weather response: {e}")))?;

        openweather::parse_current(&body)
    }
}

/// OpenWeatherMap response envelope and conversion utilities
mod openweather {
    use serde::Deserialize;

    use super::WeatherReading;
    use crate::{Result, TrafficAiError};

    /// Current-weather response from OpenWeatherMap.
    ///
    /// Only the fields the feature builder consumes are modelled; `rain` and
    /// `snow` objects are absent entirely when there is no precipitation.
    #[derive(Debug, Deserialize)]
    struct CurrentResponse {
        main: MainData,
        clouds: CloudsData,
        #[serde(default)]
        rain: Option<Precipitation>,
        #[serde(default)]
        snow: Option<Precipitation>,
    }

    #[derive(Debug, Deserialize)]
    struct MainData {
        temp: f64,
    }

    #[derive(Debug, Deserialize)]
    struct CloudsData {
        all: u8,
    }

    #[derive(Debug, Deserialize)]
    struct Precipitation {
        #[serde(rename = "1h", default)]
        one_hour: f64,
    }

    pub(super) fn parse_current(body: &str) -> Result<WeatherReading> {
        let envelope: CurrentResponse = serde_json::from_str(body).map_err(|e| {
            TrafficAiError::fetch(format!("Malformed weather response body: {e}"))
        })?;

        Ok(WeatherReading {
            temperature: envelope.main.temp,
            rain_1h: envelope.rain.map_or(0.0, |r| r.one_hour),
            snow_1h: envelope.snow.map_or(0.0, |s| s.one_hour),
            cloud_cover_pct: envelope.clouds.all,
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_full_envelope() {
            let body = r#"{
                "main": {"temp": 28.4, "humidity": 62, "pressure": 1008},
                "clouds": {"all": 75},
                "rain": {"1h": 2.5},
                "snow": {"1h": 0.3},
                "weather": [{"main": "Rain", "description": "light rain"}]
            }"#;

            let reading = parse_current(body).unwrap();
            assert_eq!(reading.temperature, 28.4);
            assert_eq!(reading.rain_1h, 2.5);
            assert_eq!(reading.snow_1h, 0.3);
            assert_eq!(reading.cloud_cover_pct, 75);
        }

        #[test]
        fn test_parse_defaults_missing_precipitation_to_zero() {
            let body = r#"{"main": {"temp": 32.0}, "clouds": {"all": 80}}"#;

            let reading = parse_current(body).unwrap();
            assert_eq!(reading.temperature, 32.0);
            assert_eq!(reading.rain_1h, 0.0);
            assert_eq!(reading.snow_1h, 0.0);
            assert_eq!(reading.cloud_cover_pct, 80);
        }

        #[test]
        fn test_parse_rain_object_without_hourly_field() {
            let body = r#"{"main": {"temp": 20.0}, "clouds": {"all": 10}, "rain": {}}"#;

            let reading = parse_current(body).unwrap();
            assert_eq!(reading.rain_1h, 0.0);
        }

        #[test]
        fn test_parse_rejects_malformed_body() {
            let err = parse_current("not json").unwrap_err();
            assert!(matches!(err, TrafficAiError::Fetch { .. }));
        }

        #[test]
        fn test_parse_rejects_missing_temperature() {
            let body = r#"{"main": {}, "clouds": {"all": 50}}"#;
            let err = parse_current(body).unwrap_err();
            assert!(matches!(err, TrafficAiError::Fetch { .. }));
        }
    }
}
