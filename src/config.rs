//! Configuration management for the `TrafficAI` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::TrafficAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TrafficAI` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficAiConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Web server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Congestion model artifact configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; without it the provider rejects every request
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// City the dashboard covers
    #[serde(default = "default_city")]
    pub city: String,
    /// ISO country code appended to the city query
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Web server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the dashboard listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Auto-refresh interval for the dashboard page in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
}

/// Congestion model artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the pre-trained model artifact, loaded read-only at startup
    #[serde(default = "default_model_path")]
    pub path: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_city() -> String {
    "Ahmedabad".to_string()
}

fn default_country_code() -> String {
    "IN".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_model_path() -> String {
    "model/congestion_model.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            city: default_city(),
            country_code: default_country_code(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            refresh_interval_seconds: default_refresh_interval(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TrafficAiConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            server: ServerConfig::default(),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TrafficAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRAFFICAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRAFFICAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TrafficAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // The provider-conventional variable wins over the config file
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            config.weather.api_key = Some(key);
        }

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trafficai").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the weather API key, if one is configured
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(TrafficAiError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }

            if api_key.len() < 8 {
                return Err(TrafficAiError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(TrafficAiError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(TrafficAiError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.server.refresh_interval_seconds < 10 {
            return Err(TrafficAiError::config(
                "Dashboard refresh interval cannot be below 10 seconds",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TrafficAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(
                TrafficAiError::config("Weather API base URL must be a valid HTTP or HTTPS URL")
                    .into(),
            );
        }

        if self.weather.city.is_empty() {
            return Err(TrafficAiError::config("City cannot be empty").into());
        }

        if self.weather.country_code.is_empty() {
            return Err(TrafficAiError::config("Country code cannot be empty").into());
        }

        if self.model.path.is_empty() {
            return Err(TrafficAiError::config("Model artifact path cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrafficAiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.weather.city, "Ahmedabad");
        assert_eq!(config.weather.country_code, "IN");
        assert_eq!(config.server.refresh_interval_seconds, 300);
    }

    #[test]
    fn test_rejects_short_api_key() {
        let mut config = TrafficAiConfig::default();
        config.weather.api_key = Some("abc".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_log_level() {
        let mut config = TrafficAiConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = TrafficAiConfig::default();
        config.weather.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_country_code() {
        let mut config = TrafficAiConfig::default();
        config.weather.country_code = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = TrafficAiConfig::default();
        config.weather.base_url = "ftp://weather.example".to_string();
        assert!(config.validate().is_err());
    }
}
